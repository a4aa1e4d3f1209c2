use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, ProductId, SequencedMap};

use crate::movement::MovementKind;
use crate::product::{NewProduct, Product, ProductPatch, UpdateOutcome};

/// Product ledger: product id → product record.
///
/// The ledger validates and applies quantity changes but does not record
/// movements itself. [`adjust_quantity`](Self::adjust_quantity) hands back a
/// [`StockAdjustment`] and the caller appends the matching movement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductLedger {
    products: SequencedMap<ProductId, Product>,
}

/// A quantity change that was applied to the ledger and must be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub kind: MovementKind,
    /// Magnitude of the change (always positive).
    pub quantity: u64,
    /// Quantity on hand after the change.
    pub on_hand: u64,
    pub min_stock: u64,
}

impl StockAdjustment {
    pub fn is_low_stock(&self) -> bool {
        self.on_hand <= self.min_stock
    }
}

/// Low-stock classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    /// Nothing on hand.
    Critical,
    /// On hand, but at or below the minimum threshold.
    Low,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "CRITICAL",
            StockStatus::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockEntry {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
    pub min_stock: u64,
    pub status: StockStatus,
}

/// Totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryValue {
    pub product_count: usize,
    pub total_units: u64,
    pub total_value: Decimal,
}

impl ProductLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product and return its freshly allocated id.
    ///
    /// The caller records the paired "initial stock" movement.
    pub fn register(&mut self, new: NewProduct, registered_at: DateTime<Utc>) -> DomainResult<ProductId> {
        new.validate()?;
        let id = self.products.allocate();
        self.products.insert(id, Product::from_new(new, registered_at));
        Ok(id)
    }

    pub fn lookup(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// All products in registration order.
    pub fn list(&self) -> impl Iterator<Item = (&ProductId, &Product)> {
        self.products.iter()
    }

    /// Apply the non-blank fields of `patch`.
    ///
    /// A field with unparseable input is reported in the outcome and left
    /// unchanged; the other fields still apply.
    pub fn update(&mut self, id: &ProductId, patch: &ProductPatch) -> DomainResult<UpdateOutcome> {
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))?;
        Ok(product.apply_patch(patch))
    }

    /// Change quantity on hand by `delta`.
    ///
    /// `delta` is positive for inbound and negative for outbound. An outbound
    /// change larger than the quantity on hand is rejected before anything is
    /// mutated.
    pub fn adjust_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
        kind: MovementKind,
    ) -> DomainResult<StockAdjustment> {
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))?;

        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        let sign_matches = match kind {
            MovementKind::Inbound => delta > 0,
            MovementKind::Outbound => delta < 0,
        };
        if !sign_matches {
            return Err(DomainError::validation(format!(
                "delta {delta} does not match movement kind {kind}"
            )));
        }

        let quantity = delta.unsigned_abs();
        let on_hand = match kind {
            MovementKind::Inbound => product
                .quantity()
                .checked_add(quantity)
                .ok_or_else(|| DomainError::validation("quantity on hand would overflow"))?,
            MovementKind::Outbound => product.quantity().checked_sub(quantity).ok_or_else(|| {
                DomainError::insufficient_stock(id.to_string(), product.quantity(), quantity)
            })?,
        };

        product.set_quantity(on_hand);

        Ok(StockAdjustment {
            product_id: *id,
            kind,
            quantity,
            on_hand,
            min_stock: product.min_stock(),
        })
    }

    /// Remove a product. Its movements stay in the log.
    pub fn delete(&mut self, id: &ProductId) -> DomainResult<Product> {
        self.products
            .remove(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))
    }

    /// Products with quantity at or below their minimum, in registration order.
    pub fn low_stock(&self) -> Vec<LowStockEntry> {
        self.products
            .iter()
            .filter(|(_, p)| p.is_low_stock())
            .map(|(id, p)| LowStockEntry {
                product_id: *id,
                name: p.name().to_string(),
                quantity: p.quantity(),
                min_stock: p.min_stock(),
                status: if p.quantity() == 0 {
                    StockStatus::Critical
                } else {
                    StockStatus::Low
                },
            })
            .collect()
    }

    /// Count, units and value over every product. Fails if the value sum
    /// overflows `Decimal`.
    pub fn total_value(&self) -> DomainResult<InventoryValue> {
        self.products.values().try_fold(
            InventoryValue {
                product_count: self.products.len(),
                total_units: 0,
                total_value: Decimal::ZERO,
            },
            |mut acc, p| {
                acc.total_units = acc.total_units.saturating_add(p.quantity());
                acc.total_value = acc
                    .total_value
                    .checked_add(p.stock_value()?)
                    .ok_or_else(|| DomainError::validation("total stock value is too large to compute"))?;
                Ok(acc)
            },
        )
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// See [`SequencedMap::repair_counter`].
    pub fn repair_counter(&mut self) -> bool {
        self.products.repair_counter()
    }
}
