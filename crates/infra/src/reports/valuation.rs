use rust_decimal::Decimal;

use stockbook_core::{DomainResult, ProductId};
use stockbook_inventory::{InventoryValue, ProductLedger};

/// Per-product line of the value report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    /// unit_price × quantity
    pub line_value: Decimal,
}

/// Total inventory value plus its per-product breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueReport {
    pub totals: InventoryValue,
    pub lines: Vec<ValueLine>,
}

impl ValueReport {
    /// Fails if any line or the grand total overflows `Decimal`.
    pub fn build(ledger: &ProductLedger) -> DomainResult<Self> {
        let lines = ledger
            .list()
            .map(|(id, p)| {
                Ok(ValueLine {
                    product_id: *id,
                    name: p.name().to_string(),
                    quantity: p.quantity(),
                    unit_price: p.unit_price(),
                    line_value: p.stock_value()?,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self {
            totals: ledger.total_value()?,
            lines,
        })
    }
}
