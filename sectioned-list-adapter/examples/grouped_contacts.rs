// Example: an alphabetical contact list replayed onto a recording surface.
use sectioned_list::ListOptions;
use sectioned_list_adapter::{RecordingSurface, SectionedList, SurfaceOp};

fn main() {
    let mut contacts = SectionedList::with_surface(RecordingSurface::new(), ListOptions::new());

    contacts
        .push_section('A', vec!["Ada", "Alan"])
        .expect("first section");
    contacts
        .push_section('G', vec!["Grace"])
        .expect("second section shows headers");
    contacts.push_item(1, "Guido").expect("append");
    contacts.set_item(0, 1, "Alan T.").expect("rebind in place");

    for op in contacts.controller_mut().surface_mut().take_ops() {
        match op {
            SurfaceOp::Attach { node, at } => println!("attach {node:?} at {at:?}"),
            SurfaceOp::Detach { node } => println!("detach {node:?}"),
        }
    }

    for node in contacts.controller().flat().iter() {
        match contacts.model().header_for(node) {
            Some(letter) => println!("== {letter} =="),
            None => println!("   {}", contacts.item_for(node).copied().unwrap_or("?")),
        }
    }
}
