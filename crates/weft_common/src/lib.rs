//! Shared foundational types used across the Weft fabric generator.
//!
//! This crate provides the common result and internal-error types shared by
//! every other crate in the workspace.

#![warn(missing_docs)]

pub mod result;

pub use result::{InternalError, WeftResult};
