use alloc::vec::Vec;

/// A lightweight, serializable snapshot of one section's materialized content.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionState {
    pub items: usize,
    pub has_header: bool,
}

/// A snapshot of everything the controller currently has materialized.
///
/// `flat_len` always equals the sum of `items` plus one per section with a header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListState {
    pub sections: Vec<SectionState>,
    pub headers_visible: bool,
    pub flat_len: usize,
}

impl ListState {
    pub fn item_total(&self) -> usize {
        self.sections.iter().map(|s| s.items).sum()
    }
}
