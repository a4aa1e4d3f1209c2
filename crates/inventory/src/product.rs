use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult};

/// Product record held by the ledger.
///
/// Quantity on hand is only ever changed through
/// [`ProductLedger::adjust_quantity`](crate::ProductLedger::adjust_quantity),
/// which is what keeps it reconcilable against the movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    unit_price: Decimal,
    quantity: u64,
    min_stock: u64,
    category: String,
    supplier: String,
    registered_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn from_new(new: NewProduct, registered_at: DateTime<Utc>) -> Self {
        Self {
            name: new.name,
            unit_price: new.unit_price,
            quantity: new.quantity,
            min_stock: new.min_stock,
            category: new.category,
            supplier: new.supplier,
            registered_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_stock(&self) -> u64 {
        self.min_stock
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Stock value of this record (unit price × quantity on hand).
    ///
    /// Fails when the product does not fit in a `Decimal`.
    pub fn stock_value(&self) -> DomainResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| DomainError::validation("stock value is too large to compute"))
    }

    /// At or below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }
}

/// Input for registering a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u64,
    pub min_stock: u64,
    pub category: String,
    pub supplier: String,
}

impl NewProduct {
    /// Parse raw text fields as typed at a prompt.
    pub fn parse(
        name: &str,
        unit_price: &str,
        quantity: &str,
        min_stock: &str,
        category: &str,
        supplier: &str,
    ) -> DomainResult<Self> {
        let new = Self {
            name: name.trim().to_string(),
            unit_price: parse_price("unit price", unit_price)?,
            quantity: parse_count("quantity", quantity)?,
            min_stock: parse_count("minimum stock", min_stock)?,
            category: category.trim().to_string(),
            supplier: supplier.trim().to_string(),
        };
        new.validate()?;
        Ok(new)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.unit_price.is_sign_negative() && !self.unit_price.is_zero() {
            return Err(DomainError::validation("unit price must not be negative"));
        }
        Ok(())
    }
}

/// Partial update of a product's descriptive fields.
///
/// Values are raw text; `None` or blank keeps the current value. Quantity on
/// hand is deliberately not editable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub unit_price: Option<String>,
    pub min_stock: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
}

impl ProductPatch {
    /// The non-blank value of a patch field, trimmed.
    fn provided(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A patch field that was supplied but could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRejection {
    pub field: &'static str,
    pub reason: String,
}

/// Result of applying a [`ProductPatch`]: valid fields apply even when others
/// are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub applied: Vec<&'static str>,
    pub rejected: Vec<FieldRejection>,
}

impl UpdateOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn reject(&mut self, field: &'static str, err: DomainError) {
        let reason = match err {
            DomainError::Validation(msg) => msg,
            other => other.to_string(),
        };
        self.rejected.push(FieldRejection { field, reason });
    }
}

impl Product {
    pub(crate) fn apply_patch(&mut self, patch: &ProductPatch) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();

        if let Some(name) = ProductPatch::provided(&patch.name) {
            self.name = name.to_string();
            outcome.applied.push("name");
        }
        if let Some(raw) = ProductPatch::provided(&patch.unit_price) {
            match parse_price("unit price", raw) {
                Ok(price) => {
                    self.unit_price = price;
                    outcome.applied.push("unit price");
                }
                Err(err) => outcome.reject("unit price", err),
            }
        }
        if let Some(raw) = ProductPatch::provided(&patch.min_stock) {
            match parse_count("minimum stock", raw) {
                Ok(min_stock) => {
                    self.min_stock = min_stock;
                    outcome.applied.push("minimum stock");
                }
                Err(err) => outcome.reject("minimum stock", err),
            }
        }
        if let Some(category) = ProductPatch::provided(&patch.category) {
            self.category = category.to_string();
            outcome.applied.push("category");
        }
        if let Some(supplier) = ProductPatch::provided(&patch.supplier) {
            self.supplier = supplier.to_string();
            outcome.applied.push("supplier");
        }

        outcome
    }
}

/// Parse a non-negative decimal price.
pub fn parse_price(field: &str, raw: &str) -> DomainResult<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    let value: Decimal = raw
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} is not a number: {raw:?}")))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!("{field} must not be negative")));
    }
    Ok(value)
}

/// Parse a non-negative whole number.
pub fn parse_count(field: &str, raw: &str) -> DomainResult<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    let value: i128 = raw
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} is not a whole number: {raw:?}")))?;
    if value < 0 {
        return Err(DomainError::validation(format!("{field} must not be negative")));
    }
    u64::try_from(value).map_err(|_| DomainError::validation(format!("{field} is too large")))
}

/// Parse a strictly positive whole number (stock movement quantities).
pub fn parse_positive(field: &str, raw: &str) -> DomainResult<u64> {
    match parse_count(field, raw)? {
        0 => Err(DomainError::validation(format!("{field} must be greater than zero"))),
        n => Ok(n),
    }
}
