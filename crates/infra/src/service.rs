//! Inventory service (application-level orchestration).
//!
//! `InventoryService` is the one owner of in-memory state for the life of the
//! process. Every caller-facing operation runs the same pipeline:
//!
//! ```text
//! validate + mutate ProductLedger
//!   ↓
//! append paired Movement (stock-affecting operations only)
//!   ↓
//! persist products, then movements (whole-collection rewrite)
//! ```
//!
//! Validation happens before any mutation, so a rejected operation leaves
//! state untouched. Persistence is not atomic across the two collections: if
//! the products save succeeds and the movements save fails, the files can
//! disagree until the next successful save.

use chrono::{DateTime, Utc};
use thiserror::Error;

use stockbook_core::{DomainError, MovementId, ProductId};
use stockbook_inventory::{
    MovementKind, MovementLog, NewProduct, Product, ProductLedger, ProductPatch, StockAdjustment,
    UpdateOutcome,
};

use crate::reports::{LowStockReport, MovementReport, ValueReport};
use crate::store::{MOVEMENTS_KEY, PRODUCTS_KEY, StateStore, StoreError, load_json, save_json};

/// Note attached to the movement recorded at registration.
pub const INITIAL_STOCK_NOTE: &str = "initial stock";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Failures caused by the request itself rather than by storage.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ServiceError::Domain(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a stock-in / stock-out operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockMovementOutcome {
    pub movement_id: MovementId,
    pub adjustment: StockAdjustment,
}

impl StockMovementOutcome {
    /// Outbound movement that left the product at or below its minimum.
    pub fn low_stock_alert(&self) -> bool {
        self.adjustment.kind == MovementKind::Outbound && self.adjustment.is_low_stock()
    }
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct InventoryService<S: StateStore> {
    store: S,
    ledger: ProductLedger,
    movements: MovementLog,
    clock: Clock,
}

impl<S: StateStore> InventoryService<S> {
    /// Load both collections from `store`.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let mut ledger: ProductLedger = load_json(&store, PRODUCTS_KEY)?;
        let mut movements: MovementLog = load_json(&store, MOVEMENTS_KEY)?;

        if ledger.repair_counter() {
            tracing::warn!(key = PRODUCTS_KEY, "persisted id counter was behind records; repaired");
        }
        if movements.repair_counter() {
            tracing::warn!(key = MOVEMENTS_KEY, "persisted id counter was behind records; repaired");
        }

        tracing::info!(
            products = ledger.len(),
            movements = movements.len(),
            "inventory loaded"
        );

        Ok(Self {
            store,
            ledger,
            movements,
            clock: Box::new(Utc::now),
        })
    }

    /// Replace the timestamp source (tests pin time with this).
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn ledger(&self) -> &ProductLedger {
        &self.ledger
    }

    pub fn movements(&self) -> &MovementLog {
        &self.movements
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lookup(&self, id: &ProductId) -> Option<&Product> {
        self.ledger.lookup(id)
    }

    /// Register a product and record its initial stock as an inbound movement.
    pub fn register(&mut self, new: NewProduct) -> ServiceResult<ProductId> {
        let now = (self.clock)();
        let quantity = new.quantity;
        let id = self.ledger.register(new, now).inspect_err(|e| {
            tracing::warn!(error = %e, "product registration rejected");
        })?;
        let movement_id =
            self.movements
                .append(id, MovementKind::Inbound, quantity, INITIAL_STOCK_NOTE, now);

        self.persist_all()?;
        tracing::info!(product_id = %id, movement_id = %movement_id, quantity, "product registered");
        Ok(id)
    }

    /// Overwrite descriptive fields. Quantity on hand is not editable here.
    pub fn update(&mut self, id: &ProductId, patch: &ProductPatch) -> ServiceResult<UpdateOutcome> {
        let outcome = self.ledger.update(id, patch)?;
        for rejected in &outcome.rejected {
            tracing::warn!(product_id = %id, field = rejected.field, reason = %rejected.reason, "update field rejected");
        }
        save_json(&self.store, PRODUCTS_KEY, &self.ledger)?;
        tracing::info!(product_id = %id, applied = ?outcome.applied, "product updated");
        Ok(outcome)
    }

    /// Stock-in: add `quantity` units.
    pub fn receive_stock(
        &mut self,
        id: &ProductId,
        quantity: u64,
        note: &str,
    ) -> ServiceResult<StockMovementOutcome> {
        let delta = signed_delta(quantity)?;
        self.adjust_quantity(id, delta, MovementKind::Inbound, note)
    }

    /// Stock-out: remove `quantity` units, refusing to go below zero.
    pub fn dispatch_stock(
        &mut self,
        id: &ProductId,
        quantity: u64,
        note: &str,
    ) -> ServiceResult<StockMovementOutcome> {
        let delta = signed_delta(quantity)?;
        self.adjust_quantity(id, -delta, MovementKind::Outbound, note)
    }

    /// Apply a signed quantity change and record the paired movement.
    pub fn adjust_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
        kind: MovementKind,
        note: &str,
    ) -> ServiceResult<StockMovementOutcome> {
        let adjustment = self
            .ledger
            .adjust_quantity(id, delta, kind)
            .inspect_err(|e| {
                tracing::warn!(product_id = %id, delta, kind = %kind, error = %e, "stock adjustment rejected");
            })?;
        let movement_id = self.movements.append(
            adjustment.product_id,
            adjustment.kind,
            adjustment.quantity,
            note.trim(),
            (self.clock)(),
        );

        self.persist_all()?;
        tracing::info!(
            product_id = %id,
            movement_id = %movement_id,
            kind = %kind,
            quantity = adjustment.quantity,
            on_hand = adjustment.on_hand,
            "stock movement recorded"
        );
        if adjustment.is_low_stock() {
            tracing::warn!(product_id = %id, on_hand = adjustment.on_hand, min_stock = adjustment.min_stock, "stock at or below minimum");
        }

        Ok(StockMovementOutcome {
            movement_id,
            adjustment,
        })
    }

    /// Delete a product. Its movements are kept as history.
    ///
    /// Confirmation is the caller's job.
    pub fn delete(&mut self, id: &ProductId) -> ServiceResult<Product> {
        let removed = self.ledger.delete(id)?;
        save_json(&self.store, PRODUCTS_KEY, &self.ledger)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(removed)
    }

    pub fn low_stock_report(&self) -> LowStockReport {
        LowStockReport::build(&self.ledger)
    }

    pub fn movement_report(&self, limit: usize) -> MovementReport {
        MovementReport::build(&self.ledger, &self.movements, limit)
    }

    pub fn value_report(&self) -> ServiceResult<ValueReport> {
        ValueReport::build(&self.ledger).map_err(|e| {
            tracing::warn!(error = %e, "stock value could not be computed");
            ServiceError::from(e)
        })
    }

    fn persist_all(&self) -> Result<(), StoreError> {
        save_json(&self.store, PRODUCTS_KEY, &self.ledger)?;
        save_json(&self.store, MOVEMENTS_KEY, &self.movements)
    }
}

fn signed_delta(quantity: u64) -> Result<i64, DomainError> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be greater than zero"));
    }
    i64::try_from(quantity).map_err(|_| DomainError::validation("quantity is too large"))
}
