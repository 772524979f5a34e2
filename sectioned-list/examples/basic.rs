// Example: a two-level model driving a ListController with incremental notifications.
use sectioned_list::{Adapter, Holder, ListController, ListOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Node {
    Header(u32),
    Row(u32),
}

struct Row {
    node: Node,
    text: String,
}

impl Holder for Row {
    type Node = Node;

    fn node(&self) -> Node {
        self.node
    }
}

struct Groups {
    groups: Vec<(&'static str, Vec<&'static str>)>,
    next: u32,
}

impl Adapter for Groups {
    type Node = Node;
    type Holder = Row;

    fn section_count(&self) -> usize {
        self.groups.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.groups[section].1.len()
    }

    fn header(&mut self, _section: usize) -> Option<Node> {
        self.next += 1;
        Some(Node::Header(self.next))
    }

    fn create_holder(&mut self) -> Row {
        self.next += 1;
        Row {
            node: Node::Row(self.next),
            text: String::new(),
        }
    }

    fn bind(&mut self, holder: &mut Row, section: usize, index: usize) {
        holder.text = self.groups[section].1[index].to_string();
    }
}

fn main() {
    let adapter = Groups {
        groups: vec![("fruit", vec!["apple", "pear"])],
        next: 0,
    };
    let options = ListOptions::new().with_on_change(Some(|c: &sectioned_list::ChangeSet| {
        println!("changed: {c:?}");
    }));
    let mut list = ListController::new(adapter, options);
    list.reload().unwrap();
    println!("one section: {:?}", list.flat().as_slice());

    list.adapter_mut().groups.push(("veg", vec!["leek"]));
    list.insert_section(1).unwrap();
    println!("two sections: {:?}", list.flat().as_slice());

    list.adapter_mut().groups[0].1.insert(1, "fig");
    list.insert_item(0, 1).unwrap();
    let row = list.holder(0, 1).unwrap();
    println!(
        "inserted {:?} ({}) at flat position {}",
        row.node,
        row.text,
        list.flat_position(0, 1).unwrap()
    );

    list.adapter_mut().groups.remove(0);
    list.remove_section(0).unwrap();
    println!("back to one section: {:?}", list.snapshot());
}
