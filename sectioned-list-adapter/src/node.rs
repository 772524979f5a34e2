/// An opaque node handle handed out by [`NodeAllocator`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Hands out [`NodeId`]s that are never reused.
#[derive(Clone, Debug, Default)]
pub struct NodeAllocator {
    next: u64,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of handles handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}
