//! `stockbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod collection;
pub mod error;
pub mod id;

pub use collection::SequencedMap;
pub use error::{DomainError, DomainResult};
pub use id::{MovementId, ProductId, SequenceId};
