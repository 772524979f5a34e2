use alloc::vec::Vec;

use sectioned_list::{ListController, ListError, ListOptions, RenderSurface, Result};

use crate::{BoundItem, ModelAdapter, NodeId, Section};

/// A [`ModelAdapter`] and its [`ListController`] mutated together.
///
/// Every method validates the address, changes the model, then issues the matching
/// notification, so the model and the flat sequence cannot drift apart.
///
/// For anything not covered here, use [`SectionedList::controller_mut`] and report changes
/// yourself.
pub struct SectionedList<H, T: Clone, S: RenderSurface<NodeId> = ()> {
    list: ListController<ModelAdapter<H, T>, S>,
}

impl<H, T: Clone> SectionedList<H, T, ()> {
    pub fn new(options: ListOptions) -> Self {
        Self::with_surface((), options)
    }

    /// Builds a list and materializes `sections` right away.
    pub fn from_sections(sections: Vec<Section<H, T>>, options: ListOptions) -> Result<Self> {
        let mut list = ListController::new(ModelAdapter::new(sections), options);
        list.reload()?;
        Ok(Self { list })
    }
}

impl<H, T: Clone, S: RenderSurface<NodeId>> SectionedList<H, T, S> {
    pub fn with_surface(surface: S, options: ListOptions) -> Self {
        Self {
            list: ListController::with_surface(ModelAdapter::default(), surface, options),
        }
    }

    pub fn controller(&self) -> &ListController<ModelAdapter<H, T>, S> {
        &self.list
    }

    pub fn controller_mut(&mut self) -> &mut ListController<ModelAdapter<H, T>, S> {
        &mut self.list
    }

    pub fn into_controller(self) -> ListController<ModelAdapter<H, T>, S> {
        self.list
    }

    pub fn model(&self) -> &ModelAdapter<H, T> {
        self.list.adapter()
    }

    pub fn surface(&self) -> &S {
        self.list.surface()
    }

    pub fn section_count(&self) -> usize {
        self.model().sections().len()
    }

    pub fn item(&self, section: usize, index: usize) -> Option<&T> {
        self.model().item(section, index)
    }

    /// The item a node shows, if it is an item node.
    pub fn item_for(&self, node: NodeId) -> Option<&T> {
        let address = self.list.address_of(node)?;
        self.item(address.section, address.item)
    }

    pub fn holder(&self, section: usize, index: usize) -> Option<&BoundItem<T>> {
        self.list.holder(section, index)
    }

    pub fn push_section(&mut self, header: H, items: Vec<T>) -> Result<usize> {
        let at = self.section_count();
        self.insert_section(at, header, items)?;
        Ok(at)
    }

    pub fn insert_section(&mut self, at: usize, header: H, items: Vec<T>) -> Result<()> {
        atrace!(at, items = items.len(), "SectionedList::insert_section");
        if at > self.section_count() {
            return Err(ListError::InvalidAddress {
                section: at,
                item: 0,
            });
        }
        self.model_mut().insert(at, Section::new(header, items));
        self.list.insert_section(at)
    }

    /// Removes `count` sections starting at `at` and returns them.
    pub fn remove_sections(&mut self, at: usize, count: usize) -> Result<Vec<Section<H, T>>> {
        atrace!(at, count, "SectionedList::remove_sections");
        self.check_sections(at, count)?;
        let removed = self.model_mut().drain(at..at + count).collect();
        self.list.remove_sections(at, count)?;
        Ok(removed)
    }

    /// Replaces a section's header payload; a visible header node is swapped for a new one.
    pub fn set_header(&mut self, section: usize, header: H) -> Result<H> {
        self.check_sections(section, 1)?;
        let s = &mut self.model_mut()[section];
        s.invalidate_header();
        let old = core::mem::replace(&mut s.header, header);
        self.list.change_section(section)?;
        Ok(old)
    }

    /// Replaces every item of a section and reconciles in a single pass.
    pub fn replace_section(&mut self, section: usize, items: Vec<T>) -> Result<Vec<T>> {
        atrace!(section, items = items.len(), "SectionedList::replace_section");
        self.check_sections(section, 1)?;
        let old = core::mem::replace(&mut self.model_mut()[section].items, items);
        self.list.change_section(section)?;
        Ok(old)
    }

    pub fn push_item(&mut self, section: usize, item: T) -> Result<usize> {
        let at = self.items_len(section)?;
        self.insert_items(section, at, [item])?;
        Ok(at)
    }

    pub fn insert_items(
        &mut self,
        section: usize,
        at: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        let len = self.items_len(section)?;
        if at > len {
            return Err(ListError::InvalidAddress { section, item: at });
        }
        let target = &mut self.model_mut()[section].items;
        let before = target.len();
        target.splice(at..at, items);
        let count = target.len() - before;
        atrace!(section, at, count, "SectionedList::insert_items");
        self.list.insert_items(section, at, count)
    }

    pub fn remove_items(&mut self, section: usize, at: usize, count: usize) -> Result<Vec<T>> {
        atrace!(section, at, count, "SectionedList::remove_items");
        self.check_items(section, at, count)?;
        let removed = self.model_mut()[section]
            .items
            .drain(at..at + count)
            .collect();
        self.list.remove_items(section, at, count)?;
        Ok(removed)
    }

    /// Replaces one item and re-binds its holder in place.
    pub fn set_item(&mut self, section: usize, index: usize, item: T) -> Result<T> {
        self.check_items(section, index, 1)?;
        let old = core::mem::replace(&mut self.model_mut()[section].items[index], item);
        self.list.change_item(section, index)?;
        Ok(old)
    }

    pub fn reload(&mut self) -> Result<()> {
        self.list.reload()
    }

    fn model_mut(&mut self) -> &mut Vec<Section<H, T>> {
        self.list.adapter_mut().sections_mut()
    }

    fn items_len(&self, section: usize) -> Result<usize> {
        self.model()
            .section(section)
            .map(|s| s.items.len())
            .ok_or(ListError::InvalidAddress { section, item: 0 })
    }

    fn check_sections(&self, at: usize, count: usize) -> Result<()> {
        match at.checked_add(count) {
            Some(end) if end <= self.section_count() => Ok(()),
            _ => Err(ListError::InvalidAddress {
                section: at.saturating_add(count),
                item: 0,
            }),
        }
    }

    fn check_items(&self, section: usize, at: usize, count: usize) -> Result<()> {
        let len = self.items_len(section)?;
        match at.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(ListError::InvalidAddress {
                section,
                item: at.saturating_add(count),
            }),
        }
    }
}

impl<H, T: Clone, S: RenderSurface<NodeId>> core::fmt::Debug for SectionedList<H, T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionedList")
            .field("list", &self.list)
            .finish()
    }
}
