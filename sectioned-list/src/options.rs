use alloc::sync::Arc;

use crate::ChangeSet;

/// A callback fired after a notification (or a whole `batch_update` scope) changed the list.
pub type OnChangeCallback = Arc<dyn Fn(&ChangeSet) + Send + Sync>;

/// Configuration for [`crate::ListController`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone, Default)]
pub struct ListOptions {
    /// Optional callback fired once per mutating call, or once per `batch_update` scope.
    ///
    /// Calls that change nothing (for example a zero-count insert) do not fire it.
    pub on_change: Option<OnChangeCallback>,

    /// Verifies the adapter contract while operations run.
    ///
    /// When enabled, the controller:
    /// - re-reads `section_count()` / `item_count()` after materializing and fails if they moved
    /// - rejects node handles that are already present in the flat sequence
    /// - asks for the header of a single-section list and fails if one is returned
    ///
    /// Each of these costs extra adapter calls or linear scans, so it is off by default.
    pub strict: bool,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ChangeSet) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .field("strict", &self.strict)
            .finish()
    }
}
