use crate::NodeHandle;

/// A materialized item: one render node plus whatever the adapter binds into it.
///
/// Holders are identified by their node; the engine never compares bound data.
pub trait Holder {
    type Node: NodeHandle;

    fn node(&self) -> Self::Node;
}

/// Supplies content for a [`crate::ListController`].
///
/// The controller only ever computes positions. Counts, header nodes, holder creation and
/// binding all come from here.
///
/// Contract:
/// - `header(section)` must return a node whenever the list has more than one section. It may
///   return `None` for a single-section list (and must, under `ListOptions::strict`).
/// - Counts must not change while a controller operation is running. `create_holder`, `bind`
///   and `header` take `&mut self` for caching, not for mutating the model.
/// - Every node handed out (holder or header) must be distinct from every node still attached.
pub trait Adapter {
    type Node: NodeHandle;
    type Holder: Holder<Node = Self::Node>;

    fn section_count(&self) -> usize;

    fn item_count(&self, section: usize) -> usize;

    fn header(&mut self, section: usize) -> Option<Self::Node>;

    fn create_holder(&mut self) -> Self::Holder;

    fn bind(&mut self, holder: &mut Self::Holder, section: usize, index: usize);
}
