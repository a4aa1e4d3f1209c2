use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{MovementId, ProductId, SequencedMap};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "INBOUND",
            MovementKind::Outbound => "OUTBOUND",
        }
    }

    /// Sign this kind gives a movement quantity when reconciling stock.
    pub fn signed(&self, quantity: u64) -> i128 {
        match self {
            MovementKind::Inbound => i128::from(quantity),
            MovementKind::Outbound => -i128::from(quantity),
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one stock quantity change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub quantity: u64,
    pub note: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log of stock movements.
///
/// Entries are never edited or removed, and may reference products that have
/// since been deleted from the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementLog {
    entries: SequencedMap<MovementId, Movement>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a movement and return its id.
    ///
    /// Kind and quantity are trusted: the caller validated them when it
    /// adjusted the ledger. Because entries are never removed, the allocated
    /// id always equals `M` + (entry count + 1).
    pub fn append(
        &mut self,
        product_id: ProductId,
        kind: MovementKind,
        quantity: u64,
        note: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> MovementId {
        let id = self.entries.allocate();
        self.entries.insert(
            id,
            Movement {
                product_id,
                kind,
                quantity,
                note: note.into(),
                recorded_at,
            },
        );
        id
    }

    pub fn get(&self, id: &MovementId) -> Option<&Movement> {
        self.entries.get(id)
    }

    /// The `limit` most recent movements, newest first.
    ///
    /// Movements sharing a timestamp are ordered by id, highest first, so the
    /// later-recorded one still comes first.
    pub fn recent(&self, limit: usize) -> Vec<(MovementId, &Movement)> {
        let mut all: Vec<(MovementId, &Movement)> =
            self.entries.iter().map(|(id, m)| (*id, m)).collect();
        all.sort_by(|(a_id, a), (b_id, b)| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b_id.cmp(a_id))
        });
        all.truncate(limit);
        all
    }

    /// Every movement, in recording order.
    pub fn history(&self) -> &SequencedMap<MovementId, Movement> {
        &self.entries
    }

    /// Movements for one product, in recording order.
    pub fn for_product(&self, product_id: ProductId) -> impl Iterator<Item = (&MovementId, &Movement)> {
        self.entries
            .iter()
            .filter(move |(_, m)| m.product_id == product_id)
    }

    /// Inbound minus outbound quantity recorded for a product.
    pub fn net_quantity(&self, product_id: ProductId) -> i128 {
        self.for_product(product_id)
            .map(|(_, m)| m.kind.signed(m.quantity))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// See [`SequencedMap::repair_counter`].
    pub fn repair_counter(&mut self) -> bool {
        self.entries.repair_counter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockbook_core::SequenceId;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn pid(seq: u64) -> ProductId {
        ProductId::from_seq(seq)
    }

    #[test]
    fn append_assigns_sequential_padded_ids() {
        let mut log = MovementLog::new();
        let first = log.append(pid(1), MovementKind::Inbound, 50, "initial stock", at(0));
        let second = log.append(pid(1), MovementKind::Outbound, 45, "", at(1));

        assert_eq!(first.to_string(), "M0001");
        assert_eq!(second.to_string(), "M0002");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn recent_is_newest_first_and_truncated() {
        let mut log = MovementLog::new();
        for n in 0..25 {
            log.append(pid(1), MovementKind::Inbound, 1, "", at(n));
        }

        let recent = log.recent(20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].0.to_string(), "M0025");
        assert_eq!(recent[19].0.to_string(), "M0006");
    }

    #[test]
    fn recent_breaks_timestamp_ties_by_id_descending() {
        let mut log = MovementLog::new();
        log.append(pid(1), MovementKind::Inbound, 1, "", at(5));
        log.append(pid(2), MovementKind::Inbound, 1, "", at(5));
        log.append(pid(3), MovementKind::Inbound, 1, "", at(1));

        let ids: Vec<String> = log.recent(10).iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["M0002", "M0001", "M0003"]);
    }

    #[test]
    fn recent_orders_by_time_not_by_id() {
        let mut log = MovementLog::new();
        log.append(pid(1), MovementKind::Inbound, 1, "", at(10));
        log.append(pid(1), MovementKind::Inbound, 1, "", at(3));

        let ids: Vec<String> = log.recent(10).iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["M0001", "M0002"]);
    }

    #[test]
    fn net_quantity_signs_by_kind() {
        let mut log = MovementLog::new();
        log.append(pid(1), MovementKind::Inbound, 50, "", at(0));
        log.append(pid(1), MovementKind::Outbound, 45, "", at(1));
        log.append(pid(2), MovementKind::Inbound, 7, "", at(2));

        assert_eq!(log.net_quantity(pid(1)), 5);
        assert_eq!(log.net_quantity(pid(2)), 7);
        assert_eq!(log.net_quantity(pid(3)), 0);
    }

    #[test]
    fn kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&MovementKind::Outbound).unwrap(),
            "\"OUTBOUND\""
        );
    }
}
