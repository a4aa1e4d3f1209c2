//! Infrastructure layer: persistence, service orchestration, reports.

pub mod reports;
pub mod service;
pub mod store;

pub use service::{InventoryService, ServiceError, ServiceResult, StockMovementOutcome};
pub use store::{InMemoryStateStore, JsonFileStore, StateStore, StoreError};
