use alloc::vec::Vec;
use core::cmp;

use crate::{
    Adapter, Address, ChangeSet, ContractViolation, FlatSequence, Holder, ListError, ListOptions,
    ListState, RenderSurface, Result, SectionIndex, SectionState,
};

/// Keeps a [`FlatSequence`] in sync with an [`Adapter`]'s sectioned data.
///
/// The controller owns the adapter, the sequence (and through it the render surface) and the
/// [`SectionIndex`]. Callers mutate their model (via [`ListController::adapter_mut`] or
/// otherwise) and then report the change with one of the `insert_*`, `remove_*` or `change_*`
/// notifications. Only [`ListController::reload`] rebuilds from scratch.
///
/// Section headers are materialized exactly when the list has more than one section; this is
/// re-evaluated after every structural change and cannot be set by the caller.
///
/// Operations run to completion synchronously. Adapter callbacks must not call back into the
/// controller.
pub struct ListController<A: Adapter, S: RenderSurface<A::Node> = ()> {
    adapter: A,
    flat: FlatSequence<A::Node, S>,
    index: SectionIndex<A::Holder>,
    options: ListOptions,

    batch_depth: usize,
    pending: ChangeSet,
}

impl<A: Adapter> ListController<A, ()> {
    /// Creates an empty, headless controller. Call [`ListController::reload`] to materialize
    /// whatever the adapter already holds.
    pub fn new(adapter: A, options: ListOptions) -> Self {
        Self::with_surface(adapter, (), options)
    }
}

impl<A: Adapter, S: RenderSurface<A::Node>> ListController<A, S> {
    pub fn with_surface(adapter: A, surface: S, options: ListOptions) -> Self {
        ldebug!(strict = options.strict, "ListController::new");
        Self {
            adapter,
            flat: FlatSequence::with_surface(surface),
            index: SectionIndex::new(),
            options,
            batch_depth: 0,
            pending: ChangeSet::default(),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions) {
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access for updating the model ahead of a notification.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Replaces the adapter and reloads everything from it.
    pub fn set_adapter(&mut self, adapter: A) -> Result<A> {
        let old = core::mem::replace(&mut self.adapter, adapter);
        self.reload()?;
        Ok(old)
    }

    pub fn flat(&self) -> &FlatSequence<A::Node, S> {
        &self.flat
    }

    pub fn surface(&self) -> &S {
        self.flat.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.flat.surface_mut()
    }

    pub fn index(&self) -> &SectionIndex<A::Holder> {
        &self.index
    }

    pub fn into_parts(self) -> (A, S) {
        (self.adapter, self.flat.into_surface())
    }

    pub fn headers_visible(&self) -> bool {
        self.index.headers_visible()
    }

    pub fn section_count(&self) -> usize {
        self.index.section_count()
    }

    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.index.item_count(section)
    }

    pub fn holder(&self, section: usize, item: usize) -> Option<&A::Holder> {
        self.index.holder(section, item)
    }

    pub fn holder_mut(&mut self, section: usize, item: usize) -> Option<&mut A::Holder> {
        self.index.holder_mut(section, item)
    }

    /// Flat position of an existing item node.
    pub fn flat_position(&self, section: usize, item: usize) -> Result<usize> {
        self.index.existing_position(&self.flat, section, item)
    }

    pub fn header_position(&self, section: usize) -> Option<usize> {
        self.flat.index_of(self.index.header(section)?)
    }

    pub fn section_of(&self, node: A::Node) -> Option<usize> {
        self.index.section_of(node)
    }

    pub fn address_of(&self, node: A::Node) -> Option<Address> {
        self.index.address_of(node)
    }

    pub fn snapshot(&self) -> ListState {
        let sections = (0..self.index.section_count())
            .map(|s| SectionState {
                items: self.index.item_count(s).unwrap_or(0),
                has_header: self.index.header(s).is_some(),
            })
            .collect::<Vec<_>>();
        ListState {
            sections,
            headers_visible: self.index.headers_visible(),
            flat_len: self.flat.len(),
        }
    }

    /// Coalesces the `on_change` notifications of every call made inside `f` into one.
    ///
    /// Nested scopes are flattened into the outermost one.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let out = f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.flush();
        }
        out
    }

    fn flush(&mut self) {
        let changes = core::mem::take(&mut self.pending);
        if changes.is_empty() {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(&changes);
        }
    }

    pub fn insert_item(&mut self, section: usize, item: usize) -> Result<()> {
        self.insert_items(section, item, 1)
    }

    /// Materializes `count` new items at `section[start..start + count]`.
    ///
    /// Items are placed one at a time in ascending order, so each placement sees the ones
    /// before it.
    pub fn insert_items(&mut self, section: usize, start: usize, count: usize) -> Result<()> {
        ltrace!(section, start, count, "insert_items");
        let len = self
            .index
            .item_count(section)
            .ok_or_else(|| ListError::invalid_address(section, start))?;
        let end = start
            .checked_add(count)
            .filter(|_| start <= len)
            .ok_or_else(|| ListError::invalid_address(section, start))?;
        self.batch_update(|list| {
            for item in start..end {
                list.materialize_item(section, item)?;
            }
            Ok(())
        })
    }

    pub fn remove_item(&mut self, section: usize, item: usize) -> Result<()> {
        self.remove_items(section, item, 1)
    }

    /// Drops the holders at `section[start..start + count]` and their nodes.
    ///
    /// Nodes are removed by identity, since every removal shifts the positions after it.
    pub fn remove_items(&mut self, section: usize, start: usize, count: usize) -> Result<()> {
        ltrace!(section, start, count, "remove_items");
        self.check_item_range(section, start, count)?;
        self.batch_update(|list| {
            for _ in 0..count {
                list.dematerialize_item(section, start)?;
            }
            Ok(())
        })
    }

    pub fn change_item(&mut self, section: usize, item: usize) -> Result<()> {
        self.change_items(section, item, 1)
    }

    /// Re-binds the holders at `section[start..start + count]` in place.
    pub fn change_items(&mut self, section: usize, start: usize, count: usize) -> Result<()> {
        ltrace!(section, start, count, "change_items");
        self.check_item_range(section, start, count)?;
        self.batch_update(|list| {
            for item in start..start + count {
                list.rebind(section, item);
            }
            Ok(())
        })
    }

    pub fn insert_section(&mut self, section: usize) -> Result<()> {
        self.insert_sections(section, 1)
    }

    /// Creates `count` sections at `start`, with their header (if headers are visible) and
    /// every item the adapter reports for them.
    pub fn insert_sections(&mut self, start: usize, count: usize) -> Result<()> {
        ltrace!(start, count, "insert_sections");
        let end = start
            .checked_add(count)
            .filter(|_| start <= self.index.section_count())
            .ok_or_else(|| ListError::invalid_address(start, 0))?;
        self.batch_update(|list| {
            let sections = list.adapter.section_count();
            for section in start..end {
                list.index.insert_section(section);
                if list.index.headers_visible() {
                    list.materialize_header(section)?;
                }
                list.materialize_section_items(section)?;
            }
            list.check_section_count(sections)?;
            list.invalidate_header_visibility()
        })
    }

    pub fn remove_section(&mut self, section: usize) -> Result<()> {
        self.remove_sections(section, 1)
    }

    /// Drops `count` sections starting at `start`, header and items included.
    pub fn remove_sections(&mut self, start: usize, count: usize) -> Result<()> {
        ltrace!(start, count, "remove_sections");
        self.check_section_range(start, count)?;
        self.batch_update(|list| {
            for _ in 0..count {
                if let Some(header) = list.index.header(start) {
                    list.remove_node(header)?;
                }
                let nodes = list
                    .index
                    .pool(start)
                    .map(|pool| pool.iter().map(Holder::node).collect::<Vec<_>>())
                    .unwrap_or_default();
                for node in nodes {
                    list.remove_node(node)?;
                }
                list.index.remove_section(start);
            }
            list.invalidate_header_visibility()
        })
    }

    pub fn change_section(&mut self, section: usize) -> Result<()> {
        self.change_sections(section, 1)
    }

    /// Reconciles `count` sections starting at `start` with the adapter in a single pass.
    ///
    /// Holders that still have a counterpart are re-bound, surplus holders are dropped, missing
    /// ones are created and appended. A visible header is replaced with whatever the adapter
    /// now returns.
    pub fn change_sections(&mut self, start: usize, count: usize) -> Result<()> {
        ltrace!(start, count, "change_sections");
        self.check_section_range(start, count)?;
        self.batch_update(|list| {
            for section in start..start + count {
                list.reconcile_section(section)?;
            }
            list.invalidate_header_visibility()
        })
    }

    /// Clears everything and materializes the adapter's content from scratch.
    pub fn reload(&mut self) -> Result<()> {
        ldebug!(
            sections = self.adapter.section_count(),
            flat_len = self.flat.len(),
            "reload"
        );
        self.batch_update(|list| {
            list.pending.removed += list.flat.len();
            list.pending.reloaded = true;
            list.flat.clear();
            list.index.clear();

            let sections = list.adapter.section_count();
            let visible = sections > 1;
            list.index.set_headers_visible(visible);
            for section in 0..sections {
                list.index.push_section();
                if visible {
                    let header = list.request_header(section)?;
                    list.append_node(header)?;
                    list.index.set_header(section, header);
                }
                let items = list.adapter.item_count(section);
                for item in 0..items {
                    let holder = list.create_bound(section, item);
                    list.append_node(holder.node())?;
                    list.index.insert_holder(section, item, holder);
                }
                list.check_item_count(section, items)?;
            }
            list.check_section_count(sections)?;
            if !visible {
                list.check_hidden_header()?;
            }
            Ok(())
        })
    }

    fn check_item_range(&self, section: usize, start: usize, count: usize) -> Result<()> {
        let len = self
            .index
            .item_count(section)
            .ok_or_else(|| ListError::invalid_address(section, start))?;
        match start.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(ListError::invalid_address(section, start.saturating_add(count))),
        }
    }

    fn check_section_range(&self, start: usize, count: usize) -> Result<()> {
        match start.checked_add(count) {
            Some(end) if end <= self.index.section_count() => Ok(()),
            _ => Err(ListError::invalid_address(start.saturating_add(count), 0)),
        }
    }

    fn create_bound(&mut self, section: usize, item: usize) -> A::Holder {
        let mut holder = self.adapter.create_holder();
        self.adapter.bind(&mut holder, section, item);
        holder
    }

    fn rebind(&mut self, section: usize, item: usize) {
        if let Some(holder) = self.index.holder_mut(section, item) {
            self.adapter.bind(holder, section, item);
            self.pending.rebound += 1;
        }
    }

    fn materialize_item(&mut self, section: usize, item: usize) -> Result<()> {
        let holder = self.create_bound(section, item);
        let position = self
            .index
            .locate_insertion_point(&self.flat, section, item)?;
        self.insert_node(holder.node(), position)?;
        self.index.insert_holder(section, item, holder);
        Ok(())
    }

    fn dematerialize_item(&mut self, section: usize, item: usize) -> Result<()> {
        let node = self
            .index
            .holder(section, item)
            .map(Holder::node)
            .ok_or_else(|| ListError::invalid_address(section, item))?;
        self.remove_node(node)?;
        self.index.remove_holder(section, item);
        Ok(())
    }

    fn materialize_header(&mut self, section: usize) -> Result<()> {
        let header = self.request_header(section)?;
        let position = self.index.header_insertion_point(&self.flat, section)?;
        self.insert_node(header, position)?;
        self.index.set_header(section, header);
        Ok(())
    }

    fn materialize_section_items(&mut self, section: usize) -> Result<()> {
        let items = self.adapter.item_count(section);
        for item in 0..items {
            self.materialize_item(section, item)?;
        }
        self.check_item_count(section, items)
    }

    fn reconcile_section(&mut self, section: usize) -> Result<()> {
        let old_len = self.index.item_count(section).unwrap_or(0);
        let new_len = self.adapter.item_count(section);

        if let Some(old) = self.index.header(section) {
            let header = self.request_header(section)?;
            if header != old {
                let position = self.remove_node(old)?;
                self.insert_node(header, position)?;
                self.index.set_header(section, header);
            }
        }

        let mut position = self
            .index
            .locate_insertion_point(&self.flat, section, 0)?;
        for item in 0..cmp::max(old_len, new_len) {
            if item < old_len {
                if item < new_len {
                    self.rebind(section, item);
                    position += 1;
                } else {
                    self.dematerialize_item(section, new_len)?;
                }
            } else {
                let holder = self.create_bound(section, item);
                self.insert_node(holder.node(), position)?;
                self.index.insert_holder(section, item, holder);
                position += 1;
            }
        }
        self.check_item_count(section, new_len)
    }

    /// Re-derives header visibility from the section count and applies the toggle.
    fn invalidate_header_visibility(&mut self) -> Result<()> {
        let visible = self.index.section_count() > 1;
        if visible != self.index.headers_visible() {
            ldebug!(
                visible,
                sections = self.index.section_count(),
                "header visibility changed"
            );
            self.index.set_headers_visible(visible);
            if visible {
                self.pending.headers_shown = true;
                for section in 0..self.index.section_count() {
                    self.materialize_header(section)?;
                }
            } else {
                self.pending.headers_hidden = true;
                for header in self.index.take_headers() {
                    self.remove_node(header)?;
                }
            }
        }
        if !visible {
            self.check_hidden_header()?;
        }
        Ok(())
    }

    fn request_header(&mut self, section: usize) -> Result<A::Node> {
        self.adapter
            .header(section)
            .ok_or_else(|| violation(ContractViolation::MissingHeader { section }))
    }

    fn insert_node(&mut self, node: A::Node, position: usize) -> Result<()> {
        if self.options.strict && self.flat.contains(node) {
            return Err(violation(ContractViolation::DuplicateNode));
        }
        self.flat.insert_at(node, position)?;
        self.pending.inserted += 1;
        Ok(())
    }

    fn append_node(&mut self, node: A::Node) -> Result<()> {
        self.insert_node(node, self.flat.len())
    }

    fn remove_node(&mut self, node: A::Node) -> Result<usize> {
        let position = self.flat.remove(node)?;
        self.pending.removed += 1;
        Ok(position)
    }

    fn check_section_count(&self, before: usize) -> Result<()> {
        if !self.options.strict {
            return Ok(());
        }
        let after = self.adapter.section_count();
        if after != before {
            return Err(violation(ContractViolation::SectionCountChanged {
                before,
                after,
            }));
        }
        Ok(())
    }

    fn check_item_count(&self, section: usize, before: usize) -> Result<()> {
        if !self.options.strict {
            return Ok(());
        }
        let after = self.adapter.item_count(section);
        if after != before {
            return Err(violation(ContractViolation::ItemCountChanged {
                section,
                before,
                after,
            }));
        }
        Ok(())
    }

    /// Only checked once the adapter agrees there is a single section; while a multi-section
    /// change is still being reported the adapter may already show headers.
    fn check_hidden_header(&mut self) -> Result<()> {
        if !self.options.strict
            || self.index.section_count() != 1
            || self.adapter.section_count() != 1
        {
            return Ok(());
        }
        if self.adapter.header(0).is_some() {
            return Err(violation(ContractViolation::UnexpectedHeader { section: 0 }));
        }
        Ok(())
    }
}

impl<A, S> core::fmt::Debug for ListController<A, S>
where
    A: Adapter,
    S: RenderSurface<A::Node>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListController")
            .field("flat", &self.flat.as_slice())
            .field("headers_visible", &self.index.headers_visible())
            .field("sections", &self.index.section_count())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn violation(v: ContractViolation) -> ListError {
    lwarn!(violation = ?v, "adapter contract violation");
    ListError::AdapterContract(v)
}
