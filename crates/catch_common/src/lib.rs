//! Shared foundational types used across the `catch` diagnostic engine.
//!
//! This crate provides the tagged [`ContextValue`] used for context annotations
//! and the ordered [`ContextMap`] that carries them through the pipeline.

#![warn(missing_docs)]

pub mod context;
pub mod value;

pub use context::{merge_absent, ContextMap};
pub use value::{looks_like_path, ContextValue};
