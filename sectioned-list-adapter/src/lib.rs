//! Adapter utilities for the `sectioned-list` crate.
//!
//! The `sectioned-list` crate only computes positions; content comes from an adapter. This
//! crate provides the pieces most integrations end up writing anyway:
//!
//! - [`ModelAdapter`]: a vector-backed model with cached header nodes
//! - [`RecordingSurface`]: a render surface that logs calls and mirrors attached nodes
//! - [`SectionedList`]: model + controller mutated together, so notifications always match
//!
//! This crate is intentionally framework-agnostic (no DOM or widget bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod list;
mod model;
mod node;
mod surface;


pub use list::SectionedList;
pub use model::{BoundItem, ModelAdapter, Section};
pub use node::{NodeAllocator, NodeId};
pub use surface::{RecordingSurface, SurfaceOp};
