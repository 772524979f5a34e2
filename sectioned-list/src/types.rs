/// A logical `(section, item)` address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub section: usize,
    pub item: usize,
}

impl Address {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Where a render surface should attach a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachPoint<N> {
    /// Before every other node.
    Start,
    /// Immediately after the given, already attached, node.
    After(N),
}

/// What a notification (or a batch of them) did to the flat sequence.
///
/// Delivered to [`crate::ListOptions::on_change`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeSet {
    /// Item and header nodes inserted into the sequence.
    pub inserted: usize,
    /// Item and header nodes removed from the sequence.
    pub removed: usize,
    /// Holders re-bound in place.
    pub rebound: usize,
    pub headers_shown: bool,
    pub headers_hidden: bool,
    pub reloaded: bool,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
