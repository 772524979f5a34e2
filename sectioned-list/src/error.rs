/// Result type alias for list operations.
pub type Result<T> = core::result::Result<T, ListError>;

/// Errors returned by [`crate::FlatSequence`] and [`crate::ListController`].
///
/// None of these are transient: each one means a caller or adapter broke its contract, so the
/// engine reports it immediately and never retries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A flat position outside the bounds of the sequence.
    #[error("position {position} is out of range for a sequence of length {len}")]
    OutOfRange { position: usize, len: usize },

    /// An identity lookup found no such node in the flat sequence.
    #[error("node is not present in the flat sequence")]
    NodeNotFound,

    /// A `(section, item)` address the current pools cannot resolve.
    #[error("address (section {section}, item {item}) does not resolve against the current pools")]
    InvalidAddress { section: usize, item: usize },

    /// The adapter broke its contract.
    #[error("adapter contract violation: {0}")]
    AdapterContract(#[from] ContractViolation),
}

impl ListError {
    pub(crate) fn invalid_address(section: usize, item: usize) -> Self {
        lwarn!(section, item, "invalid address");
        Self::InvalidAddress { section, item }
    }

    pub(crate) fn out_of_range(position: usize, len: usize) -> Self {
        Self::OutOfRange { position, len }
    }
}

/// The specific adapter contract breach behind [`ListError::AdapterContract`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// Headers are visible but the adapter returned no header for this section.
    #[error("no header returned for section {section} while headers are visible")]
    MissingHeader { section: usize },

    /// Headers are hidden but the adapter still returned one.
    #[error("header returned for section {section} while headers are hidden")]
    UnexpectedHeader { section: usize },

    /// `section_count()` changed while a single operation was running.
    #[error("section count changed from {before} to {after} within one operation")]
    SectionCountChanged { before: usize, after: usize },

    /// `item_count(section)` changed while a single operation was running.
    #[error("item count of section {section} changed from {before} to {after} within one operation")]
    ItemCountChanged {
        section: usize,
        before: usize,
        after: usize,
    },

    /// The adapter handed out a node that is already materialized.
    #[error("node handed out by the adapter is already in the flat sequence")]
    DuplicateNode,
}
