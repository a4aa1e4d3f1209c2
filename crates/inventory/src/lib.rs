//! Inventory domain module.
//!
//! This crate contains business rules for the product ledger and the movement
//! log, implemented purely as deterministic domain logic (no IO, no terminal,
//! no storage). Callers pass timestamps in explicitly.

pub mod ledger;
pub mod movement;
pub mod product;

pub use ledger::{InventoryValue, LowStockEntry, ProductLedger, StockAdjustment, StockStatus};
pub use movement::{Movement, MovementKind, MovementLog};
pub use product::{FieldRejection, NewProduct, Product, ProductPatch, UpdateOutcome};
