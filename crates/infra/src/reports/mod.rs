//! Read-only reports composed from the ledger and the movement log.
//!
//! Reports are plain data; rendering them for a terminal is the CLI's job.

mod low_stock;
mod movements;
mod valuation;

pub use low_stock::LowStockReport;
pub use movements::{MovementReport, MovementRow};
pub use valuation::{ValueLine, ValueReport};

/// Product name shown for movements whose product was deleted.
pub const UNKNOWN_PRODUCT: &str = "N/A";

/// Number of movements the movement report shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 20;
