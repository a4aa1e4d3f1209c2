use stockbook_inventory::{LowStockEntry, ProductLedger};

/// Products at or below their minimum stock, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockReport {
    pub entries: Vec<LowStockEntry>,
}

impl LowStockReport {
    pub fn build(ledger: &ProductLedger) -> Self {
        Self {
            entries: ledger.low_stock(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockbook_inventory::{MovementKind, NewProduct, StockStatus};

    #[test]
    fn empty_when_everything_is_stocked() {
        let mut ledger = ProductLedger::new();
        ledger
            .register(NewProduct::parse("Bolt", "1", "10", "2", "", "").unwrap(), Utc::now())
            .unwrap();
        assert!(LowStockReport::build(&ledger).is_empty());
    }

    #[test]
    fn draining_a_product_makes_it_critical() {
        let mut ledger = ProductLedger::new();
        let id = ledger
            .register(NewProduct::parse("Bolt", "1", "3", "2", "", "").unwrap(), Utc::now())
            .unwrap();
        ledger.adjust_quantity(&id, -3, MovementKind::Outbound).unwrap();

        let report = LowStockReport::build(&ledger);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].status, StockStatus::Critical);
    }
}
