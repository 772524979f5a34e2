/// Bound for opaque render-node handles.
///
/// Handles are compared by value, so an adapter must never hand out the same handle for two
/// live nodes.
pub trait NodeHandle: Copy + Eq + core::fmt::Debug {}
impl<T: Copy + Eq + core::fmt::Debug> NodeHandle for T {}
