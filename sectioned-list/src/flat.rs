use alloc::vec::Vec;

use crate::{AttachPoint, ListError, NodeHandle, Result};

/// The visual side of a [`FlatSequence`].
///
/// Implementations realize sequence mutations on a real surface (a DOM, a widget tree, a
/// terminal buffer). Each method is called exactly once per node mutation, in sequence order.
pub trait RenderSurface<N> {
    fn attach(&mut self, node: N, at: AttachPoint<N>);

    fn detach(&mut self, node: N);
}

/// Headless surface: the sequence alone is the source of truth.
impl<N> RenderSurface<N> for () {
    fn attach(&mut self, _node: N, _at: AttachPoint<N>) {}

    fn detach(&mut self, _node: N) {}
}

/// The ordered list of every materialized node, headers and items interleaved.
#[derive(Clone, Debug)]
pub struct FlatSequence<N, S = ()> {
    nodes: Vec<N>,
    surface: S,
}

impl<N: NodeHandle> FlatSequence<N, ()> {
    pub fn new() -> Self {
        Self::with_surface(())
    }
}

impl<N: NodeHandle> Default for FlatSequence<N, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeHandle, S: RenderSurface<N>> FlatSequence<N, S> {
    pub fn with_surface(surface: S) -> Self {
        Self {
            nodes: Vec::new(),
            surface,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<N> {
        self.nodes.get(position).copied()
    }

    pub fn as_slice(&self) -> &[N] {
        &self.nodes
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = N> + '_ {
        self.nodes.iter().copied()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn append(&mut self, node: N) {
        let at = match self.nodes.last() {
            Some(&prev) => AttachPoint::After(prev),
            None => AttachPoint::Start,
        };
        self.nodes.push(node);
        self.surface.attach(node, at);
    }

    /// Inserts `node` so that it ends up at `position`. `position == len()` appends.
    pub fn insert_at(&mut self, node: N, position: usize) -> Result<()> {
        let len = self.nodes.len();
        if position > len {
            return Err(ListError::out_of_range(position, len));
        }
        let at = match position {
            0 => AttachPoint::Start,
            p => AttachPoint::After(self.nodes[p - 1]),
        };
        self.nodes.insert(position, node);
        self.surface.attach(node, at);
        Ok(())
    }

    pub fn remove_at(&mut self, position: usize) -> Result<N> {
        let len = self.nodes.len();
        if position >= len {
            return Err(ListError::out_of_range(position, len));
        }
        let node = self.nodes.remove(position);
        self.surface.detach(node);
        Ok(node)
    }

    /// Removes `node` by identity and returns the position it occupied.
    pub fn remove(&mut self, node: N) -> Result<usize> {
        let position = self.index_of(node).ok_or(ListError::NodeNotFound)?;
        self.remove_at(position)?;
        Ok(position)
    }

    pub fn index_of(&self, node: N) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    pub fn contains(&self, node: N) -> bool {
        self.nodes.contains(&node)
    }

    /// Removes every node, detaching front to back.
    pub fn clear(&mut self) {
        for node in self.nodes.drain(..) {
            self.surface.detach(node);
        }
    }
}
