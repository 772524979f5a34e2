use alloc::vec::Vec;

use sectioned_list::{AttachPoint, RenderSurface};

/// One call a [`RecordingSurface`] received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceOp<N> {
    Attach { node: N, at: AttachPoint<N> },
    Detach { node: N },
}

/// A surface that logs every call and keeps a mirror of what would be on screen.
///
/// Useful for tests and for adapters that replay operations onto a real surface later (for
/// example once per frame).
#[derive(Clone, Debug)]
pub struct RecordingSurface<N> {
    ops: Vec<SurfaceOp<N>>,
    attached: Vec<N>,
}

impl<N> Default for RecordingSurface<N> {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            attached: Vec::new(),
        }
    }
}

impl<N: Copy + PartialEq> RecordingSurface<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp<N>] {
        &self.ops
    }

    /// Drains the log, leaving the mirror untouched.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp<N>> {
        core::mem::take(&mut self.ops)
    }

    /// The nodes currently attached, in surface order.
    pub fn attached(&self) -> &[N] {
        &self.attached
    }
}

impl<N: Copy + PartialEq> RenderSurface<N> for RecordingSurface<N> {
    fn attach(&mut self, node: N, at: AttachPoint<N>) {
        let position = match at {
            AttachPoint::Start => 0,
            AttachPoint::After(prev) => match self.attached.iter().position(|&n| n == prev) {
                Some(p) => p + 1,
                None => {
                    debug_assert!(false, "RecordingSurface: attach after a detached node");
                    self.attached.len()
                }
            },
        };
        self.attached.insert(position, node);
        self.ops.push(SurfaceOp::Attach { node, at });
    }

    fn detach(&mut self, node: N) {
        if let Some(p) = self.attached.iter().position(|&n| n == node) {
            self.attached.remove(p);
        } else {
            debug_assert!(false, "RecordingSurface: detach of a node that is not attached");
        }
        self.ops.push(SurfaceOp::Detach { node });
    }
}
