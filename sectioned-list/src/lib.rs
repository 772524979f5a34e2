//! A headless index engine for sectioned lists.
//!
//! A sectioned list is two-level data (sections holding items, each section optionally led by
//! a header) rendered as one flat sequence of nodes. This crate keeps that flat sequence in
//! sync with the data as items and sections are inserted, removed and changed, without
//! rebuilding anything unless asked to.
//!
//! It is UI-agnostic. An integration provides:
//! - an [`Adapter`]: section/item counts, header nodes, holder creation and binding
//! - optionally a [`RenderSurface`]: attaches and detaches nodes on the real surface
//!
//! For a ready-made model adapter and a recording surface, see the `sectioned-list-adapter`
//! crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod controller;
mod error;
mod fenwick;
mod flat;
mod index;
mod key;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use adapter::{Adapter, Holder};
pub use controller::ListController;
pub use error::{ContractViolation, ListError, Result};
pub use flat::{FlatSequence, RenderSurface};
pub use index::SectionIndex;
pub use key::NodeHandle;
pub use options::{ListOptions, OnChangeCallback};
pub use state::{ListState, SectionState};
pub use types::{Address, AttachPoint, ChangeSet};
