use alloc::vec::Vec;

use sectioned_list::{Adapter, Address, Holder};

use crate::{NodeAllocator, NodeId};

/// One section of a [`ModelAdapter`]: a header payload and its items.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<H, T> {
    pub header: H,
    pub items: Vec<T>,
    header_node: Option<NodeId>,
}

impl<H, T> Section<H, T> {
    pub fn new(header: H, items: Vec<T>) -> Self {
        Self {
            header,
            items,
            header_node: None,
        }
    }

    /// The header node handed out for this section, if one was requested.
    pub fn header_node(&self) -> Option<NodeId> {
        self.header_node
    }

    /// Forgets the cached header node so the next request hands out a fresh one.
    pub fn invalidate_header(&mut self) {
        self.header_node = None;
    }
}

/// The holder type of [`ModelAdapter`]: a node plus a copy of the value it shows.
#[derive(Clone, Debug)]
pub struct BoundItem<T> {
    node: NodeId,
    value: Option<T>,
    address: Option<Address>,
    binds: usize,
}

impl<T> BoundItem<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The address this holder was last bound to.
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn binds(&self) -> usize {
        self.binds
    }
}

impl<T> Holder for BoundItem<T> {
    type Node = NodeId;

    fn node(&self) -> NodeId {
        self.node
    }
}

/// A vector-backed [`Adapter`].
///
/// Header nodes are allocated on first request and cached per section, so showing headers
/// again after hiding them reuses the same node. Single-section models report no header.
#[derive(Clone, Debug)]
pub struct ModelAdapter<H, T> {
    sections: Vec<Section<H, T>>,
    nodes: NodeAllocator,
}

impl<H, T> Default for ModelAdapter<H, T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<H, T> ModelAdapter<H, T> {
    pub fn new(sections: Vec<Section<H, T>>) -> Self {
        Self {
            sections,
            nodes: NodeAllocator::new(),
        }
    }

    pub fn sections(&self) -> &[Section<H, T>] {
        &self.sections
    }

    /// Direct model access. Every change made here must be reported to the controller.
    pub fn sections_mut(&mut self) -> &mut Vec<Section<H, T>> {
        &mut self.sections
    }

    pub fn section(&self, section: usize) -> Option<&Section<H, T>> {
        self.sections.get(section)
    }

    pub fn item(&self, section: usize, index: usize) -> Option<&T> {
        self.sections.get(section)?.items.get(index)
    }

    /// The header payload shown by `node`, if it is a header node of this model.
    pub fn header_for(&self, node: NodeId) -> Option<&H> {
        self.sections
            .iter()
            .find(|s| s.header_node == Some(node))
            .map(|s| &s.header)
    }

    pub fn nodes_allocated(&self) -> u64 {
        self.nodes.allocated()
    }
}

impl<H, T: Clone> Adapter for ModelAdapter<H, T> {
    type Node = NodeId;
    type Holder = BoundItem<T>;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.items.len())
    }

    fn header(&mut self, section: usize) -> Option<NodeId> {
        if self.sections.len() <= 1 {
            return None;
        }
        let nodes = &mut self.nodes;
        let s = self.sections.get_mut(section)?;
        Some(*s.header_node.get_or_insert_with(|| nodes.allocate()))
    }

    fn create_holder(&mut self) -> BoundItem<T> {
        BoundItem {
            node: self.nodes.allocate(),
            value: None,
            address: None,
            binds: 0,
        }
    }

    fn bind(&mut self, holder: &mut BoundItem<T>, section: usize, index: usize) {
        holder.value = self.item(section, index).cloned();
        holder.address = Some(Address::new(section, index));
        holder.binds += 1;
    }
}
