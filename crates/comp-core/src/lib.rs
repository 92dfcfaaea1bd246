//! # comp-core
//!
//! Core types for the comp-rs node compositor.
//!
//! This crate provides the foundational types shared by every stage of the
//! compositor pipeline:
//!
//! - [`DataKind`] - The closed set of pixel data kinds flowing along graph links
//! - [`OpResult`] - A typed pixel buffer or single broadcastable value
//! - [`Rect`] - The rectangular pixel domain a result is defined over
//! - [`InputDescriptor`] - Per-input metadata declared by consuming nodes
//!
//! ## Design Philosophy
//!
//! Every link in an operation graph carries an [`OpResult`] tagged with its
//! [`DataKind`]. A result's kind never changes in place: anything that needs a
//! different kind produces a *new* result. The graph layer builds on this to
//! insert conversion nodes wherever an upstream kind does not match what a
//! consumer declares through its [`InputDescriptor`].
//!
//! ## Crate Structure
//!
//! This crate is the foundation of comp-rs and has no internal dependencies:
//!
//! ```text
//! comp-core (this crate)
//!    ^
//!    |
//!    +-- comp-graph (operations, conversion, execution backends)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod descriptor;
pub mod error;
pub mod kind;
pub mod rect;
pub mod result;

pub use descriptor::InputDescriptor;
pub use error::{Error, Result};
pub use kind::DataKind;
pub use rect::Rect;
pub use result::OpResult;
