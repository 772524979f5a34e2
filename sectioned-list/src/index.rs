use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{Address, FlatSequence, Holder, ListError, RenderSurface, Result};

/// Per-section pools of materialized holders and header nodes, plus the arithmetic that maps
/// logical addresses onto flat positions.
///
/// The index never touches the [`FlatSequence`] itself; it only reads positions from it. The
/// controller applies the sequence mutation and the matching pool mutation back to back.
#[derive(Debug)]
pub struct SectionIndex<H: Holder> {
    pools: Vec<Vec<H>>,
    headers: Vec<Option<H::Node>>, // aligned with `pools`
    headers_visible: bool,
    counts: Fenwick,
}

impl<H: Holder> Default for SectionIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Holder> SectionIndex<H> {
    pub fn new() -> Self {
        Self {
            pools: Vec::new(),
            headers: Vec::new(),
            headers_visible: false,
            counts: Fenwick::new(),
        }
    }

    pub fn section_count(&self) -> usize {
        self.pools.len()
    }

    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.pools.get(section).map(Vec::len)
    }

    /// Total number of materialized holders across all sections.
    pub fn item_total(&self) -> usize {
        self.counts.total()
    }

    pub fn headers_visible(&self) -> bool {
        self.headers_visible
    }

    pub fn pool(&self, section: usize) -> Option<&[H]> {
        self.pools.get(section).map(Vec::as_slice)
    }

    pub fn holder(&self, section: usize, item: usize) -> Option<&H> {
        self.pools.get(section)?.get(item)
    }

    pub fn holder_mut(&mut self, section: usize, item: usize) -> Option<&mut H> {
        self.pools.get_mut(section)?.get_mut(item)
    }

    pub fn header(&self, section: usize) -> Option<H::Node> {
        self.headers.get(section).copied().flatten()
    }

    /// Number of header nodes currently materialized.
    pub fn header_count(&self) -> usize {
        self.headers.iter().filter(|h| h.is_some()).count()
    }

    /// The section owning `node`, whether it is a header or an item node.
    pub fn section_of(&self, node: H::Node) -> Option<usize> {
        if let Some(section) = self.headers.iter().position(|&h| h == Some(node)) {
            return Some(section);
        }
        self.address_of(node).map(|a| a.section)
    }

    /// The logical address of an item node.
    pub fn address_of(&self, node: H::Node) -> Option<Address> {
        self.pools.iter().enumerate().find_map(|(section, pool)| {
            pool.iter()
                .position(|h| h.node() == node)
                .map(|item| Address::new(section, item))
        })
    }

    /// The last materialized item strictly before `section`, with the section holding it.
    ///
    /// `section` may be past the end of the pools (a trailing section about to be created).
    pub fn anchor_before(&self, section: usize) -> Option<(usize, &H)> {
        let before = self.counts.prefix_sum(section.min(self.pools.len()));
        if before == 0 {
            return None;
        }
        let anchor_section = self.counts.lower_bound(before - 1);
        let holder = self.pools.get(anchor_section)?.last()?;
        Some((anchor_section, holder))
    }

    /// Flat position for an element about to be inserted at `(section, item)`.
    ///
    /// - Target section missing or empty: one past the last item before it, plus one slot per
    ///   crossed section boundary when headers are visible (each of those sections, this one
    ///   included, owns a header).
    /// - `item` past the end of a non-empty pool: one past the section's last item.
    /// - Otherwise: the position of the item currently at `item`, which gets pushed forward.
    pub fn locate_insertion_point<S: RenderSurface<H::Node>>(
        &self,
        flat: &FlatSequence<H::Node, S>,
        section: usize,
        item: usize,
    ) -> Result<usize> {
        self.locate(flat, section, item, self.headers_visible)
    }

    /// Flat position for the header of `section`, which must not be materialized yet.
    ///
    /// Headers of earlier sections are assumed present; that holds both when a section is
    /// created while headers are visible and while headers are being shown in ascending order.
    pub fn header_insertion_point<S: RenderSurface<H::Node>>(
        &self,
        flat: &FlatSequence<H::Node, S>,
        section: usize,
    ) -> Result<usize> {
        if let Some(first) = self.pools.get(section).and_then(|p| p.first()) {
            return flat.index_of(first.node()).ok_or(ListError::NodeNotFound);
        }
        Ok(self.locate(flat, section, 0, true)? - 1)
    }

    /// Flat position of an already materialized item.
    pub fn existing_position<S: RenderSurface<H::Node>>(
        &self,
        flat: &FlatSequence<H::Node, S>,
        section: usize,
        item: usize,
    ) -> Result<usize> {
        let holder = self
            .holder(section, item)
            .ok_or_else(|| ListError::invalid_address(section, item))?;
        flat.index_of(holder.node()).ok_or(ListError::NodeNotFound)
    }

    fn locate<S: RenderSurface<H::Node>>(
        &self,
        flat: &FlatSequence<H::Node, S>,
        section: usize,
        item: usize,
        headers: bool,
    ) -> Result<usize> {
        let pool = match self.pools.get(section) {
            Some(pool) if !pool.is_empty() => pool,
            _ => {
                let Some((anchor_section, anchor)) = self.anchor_before(section) else {
                    // First content in the list: only headers can precede it.
                    return Ok(if headers { section + 1 } else { 0 });
                };
                let anchor_position = flat
                    .index_of(anchor.node())
                    .ok_or(ListError::NodeNotFound)?;
                let correction = if headers { section - anchor_section } else { 0 };
                return Ok(anchor_position + 1 + correction);
            }
        };

        if let Some(existing) = pool.get(item) {
            return flat.index_of(existing.node()).ok_or(ListError::NodeNotFound);
        }
        let last = &pool[pool.len() - 1];
        flat.index_of(last.node())
            .map(|p| p + 1)
            .ok_or(ListError::NodeNotFound)
    }

    pub(crate) fn set_headers_visible(&mut self, visible: bool) {
        self.headers_visible = visible;
    }

    pub(crate) fn set_header(&mut self, section: usize, node: H::Node) {
        self.headers[section] = Some(node);
    }

    /// Forgets every header node, returning them in ascending section order.
    pub(crate) fn take_headers(&mut self) -> Vec<H::Node> {
        self.headers.iter_mut().filter_map(Option::take).collect()
    }

    pub(crate) fn insert_section(&mut self, section: usize) {
        self.pools.insert(section, Vec::new());
        self.headers.insert(section, None);
        self.rebuild_counts();
    }

    pub(crate) fn push_section(&mut self) {
        self.pools.push(Vec::new());
        self.headers.push(None);
        self.counts.push_value(0);
    }

    pub(crate) fn remove_section(&mut self, section: usize) -> (Option<H::Node>, Vec<H>) {
        let pool = self.pools.remove(section);
        let header = self.headers.remove(section);
        self.rebuild_counts();
        (header, pool)
    }

    pub(crate) fn insert_holder(&mut self, section: usize, item: usize, holder: H) {
        self.pools[section].insert(item, holder);
        self.counts.add(section, 1);
    }

    pub(crate) fn remove_holder(&mut self, section: usize, item: usize) -> H {
        let holder = self.pools[section].remove(item);
        self.counts.add(section, -1);
        holder
    }

    pub(crate) fn clear(&mut self) {
        self.pools.clear();
        self.headers.clear();
        self.headers_visible = false;
        self.counts = Fenwick::new();
    }

    fn rebuild_counts(&mut self) {
        self.counts = Fenwick::from_counts(self.pools.iter().map(Vec::len));
    }
}
