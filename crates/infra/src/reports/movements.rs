use chrono::{DateTime, Utc};

use stockbook_core::{MovementId, ProductId};
use stockbook_inventory::{MovementKind, MovementLog, ProductLedger};

use super::UNKNOWN_PRODUCT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    pub movement_id: MovementId,
    pub product_id: ProductId,
    /// Current product name, or [`UNKNOWN_PRODUCT`] if it was deleted.
    pub product_name: String,
    pub kind: MovementKind,
    pub quantity: u64,
    pub note: String,
    pub recorded_at: DateTime<Utc>,
}

/// Most recent movements, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementReport {
    pub rows: Vec<MovementRow>,
}

impl MovementReport {
    pub fn build(ledger: &ProductLedger, log: &MovementLog, limit: usize) -> Self {
        let rows = log
            .recent(limit)
            .into_iter()
            .map(|(movement_id, m)| MovementRow {
                movement_id,
                product_id: m.product_id,
                product_name: ledger
                    .lookup(&m.product_id)
                    .map(|p| p.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                kind: m.kind,
                quantity: m.quantity,
                note: m.note.clone(),
                recorded_at: m.recorded_at,
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockbook_inventory::NewProduct;

    #[test]
    fn resolves_names_and_falls_back_for_orphans() {
        let t = |s: i64| Utc.timestamp_opt(1_700_000_000 + s, 0).unwrap();
        let mut ledger = ProductLedger::new();
        let mut log = MovementLog::new();

        let kept = ledger
            .register(NewProduct::parse("Hammer", "9", "1", "0", "", "").unwrap(), t(0))
            .unwrap();
        let gone = ledger
            .register(NewProduct::parse("Saw", "9", "1", "0", "", "").unwrap(), t(1))
            .unwrap();
        log.append(kept, MovementKind::Inbound, 1, "initial stock", t(0));
        log.append(gone, MovementKind::Inbound, 1, "initial stock", t(1));
        ledger.delete(&gone).unwrap();

        let report = MovementReport::build(&ledger, &log, 20);
        assert_eq!(report.rows[0].product_name, UNKNOWN_PRODUCT);
        assert_eq!(report.rows[1].product_name, "Hammer");
    }

    #[test]
    fn respects_limit() {
        let mut log = MovementLog::new();
        let ledger = ProductLedger::new();
        let pid: ProductId = "P001".parse().unwrap();
        for _ in 0..30 {
            log.append(pid, MovementKind::Inbound, 1, "", Utc::now());
        }
        assert_eq!(MovementReport::build(&ledger, &log, 20).rows.len(), 20);
    }
}
