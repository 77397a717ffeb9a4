use dashmap::DashMap;

/// Latest word order per team. The server enforces no ordering rule: the last
/// write wins.
#[derive(Debug, Default)]
pub struct WordOrders {
    orders: DashMap<String, Vec<String>>,
}

impl WordOrders {
    /// Snapshot of the order recorded for `team`, if any.
    pub fn get(&self, team: &str) -> Option<Vec<String>> {
        self.orders.get(team).map(|entry| entry.value().clone())
    }

    /// Replace the order of `team`.
    pub fn set(&self, team: &str, order: Vec<String>) {
        self.orders.insert(team.to_string(), order);
    }

    /// Forget every recorded order.
    pub fn clear(&self) {
        self.orders.clear();
    }
}
