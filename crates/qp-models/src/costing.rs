//! Costing group model (costeo)
//!
//! One pricing line of a quotation. Aggregates line entry subtotals into a direct cost and
//! applies the fixed GG and utilidad markups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::line_entry::LineEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostingGroup {
    /// Client-generated id, unique within the draft
    pub id: String,
    pub description: String,
    pub quantity: Decimal,

    // Derived by the costing aggregator
    /// Sum of entry subtotals (costo directo)
    pub direct_cost: Decimal,
    /// General overhead, 10 % of direct cost (GG)
    pub overhead: Decimal,
    /// Profit, 30 % of direct cost (utilidad)
    pub profit: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,

    pub entries: Vec<LineEntry>,
}

impl CostingGroup {
    /// New costing line as the form adds it: quantity 1, everything else zero
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            quantity: Decimal::ONE,
            direct_cost: Decimal::ZERO,
            overhead: Decimal::ZERO,
            profit: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            total_price: Decimal::ZERO,
            entries: Vec::new(),
        }
    }

    /// Set the free-text description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set how many units of this costing are quoted
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// Append a line entry
    pub fn with_entry(mut self, entry: LineEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Find an entry by id
    pub fn entry(&self, entry_id: &str) -> Option<&LineEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// Find an entry by id for editing
    pub fn entry_mut(&mut self, entry_id: &str) -> Option<&mut LineEntry> {
        self.entries.iter_mut().find(|e| e.id == entry_id)
    }

    /// Remove an entry, returning it if it existed
    pub fn remove_entry(&mut self, entry_id: &str) -> Option<LineEntry> {
        let position = self.entries.iter().position(|e| e.id == entry_id)?;
        Some(self.entries.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_costing_defaults() {
        let costing = CostingGroup::new("c1");
        assert_eq!(costing.quantity, Decimal::ONE);
        assert_eq!(costing.direct_cost, Decimal::ZERO);
        assert_eq!(costing.total_price, Decimal::ZERO);
        assert!(costing.entries.is_empty());
    }

    #[test]
    fn test_remove_entry() {
        let mut costing = CostingGroup::new("c1")
            .with_entry(LineEntry::servicio("e1", 2, Decimal::ONE, Decimal::TEN))
            .with_entry(LineEntry::area("e2", 1, Decimal::ONE, Decimal::TEN));

        let removed = costing.remove_entry("e1").unwrap();
        assert_eq!(removed.id, "e1");
        assert_eq!(costing.entries.len(), 1);
        assert!(costing.remove_entry("e1").is_none());
        assert!(costing.entry("e2").is_some());
    }
}
