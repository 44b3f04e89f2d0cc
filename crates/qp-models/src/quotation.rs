//! Quotation draft model (cotización)
//!
//! Owned by one form session: created empty, mutated by user input, discarded on submit
//! or navigation away.

use qp_core::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::CostingGroup;
use crate::ids::generate_client_id;
use crate::line_entry::LineEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDraft {
    /// Server id when editing an existing quotation
    pub id: Option<Id>,
    pub subject: String,
    pub client_id: Id,
    /// Raw form value, parsed when days are derived
    pub start_date: String,
    pub end_date: String,

    // Derived by the quotation aggregator
    pub days: i64,
    pub total_price: Decimal,

    pub costings: Vec<CostingGroup>,
}

impl QuotationDraft {
    /// Empty draft with no costing groups
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the client the quotation is addressed to
    pub fn with_client(mut self, client_id: Id) -> Self {
        self.client_id = client_id;
        self
    }

    /// Set the raw start and end dates, in the form's format
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Append a costing group
    pub fn with_costing(mut self, costing: CostingGroup) -> Self {
        self.costings.push(costing);
        self
    }

    /// Find a costing group by id
    pub fn costing(&self, costing_id: &str) -> Option<&CostingGroup> {
        self.costings.iter().find(|c| c.id == costing_id)
    }

    pub fn costing_mut(&mut self, costing_id: &str) -> Option<&mut CostingGroup> {
        self.costings.iter_mut().find(|c| c.id == costing_id)
    }

    /// Remove a costing group, returning it if it existed
    pub fn remove_costing(&mut self, costing_id: &str) -> Option<CostingGroup> {
        let position = self.costings.iter().position(|c| c.id == costing_id)?;
        Some(self.costings.remove(position))
    }

    /// All line entries across costing groups
    pub fn entries(&self) -> impl Iterator<Item = &LineEntry> {
        self.costings.iter().flat_map(|c| c.entries.iter())
    }

    /// Whether a costing group or line entry already uses this id
    pub fn is_id_taken(&self, id: &str) -> bool {
        self.costings.iter().any(|c| c.id == id) || self.entries().any(|e| e.id == id)
    }

    /// A fresh id unique within this draft
    pub fn fresh_id(&self) -> String {
        generate_client_id(|candidate| self.is_id_taken(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuotationDraft {
        QuotationDraft::new()
            .with_subject("Mantenimiento planta")
            .with_client(7)
            .with_costing(
                CostingGroup::new("c1")
                    .with_entry(LineEntry::servicio("e1", 2, Decimal::ONE, Decimal::TEN)),
            )
            .with_costing(CostingGroup::new("c2"))
    }

    #[test]
    fn test_lookup_and_remove_costing() {
        let mut draft = sample();
        assert!(draft.costing("c2").is_some());
        assert!(draft.remove_costing("c2").is_some());
        assert!(draft.costing("c2").is_none());
        assert!(draft.remove_costing("c2").is_none());
    }

    #[test]
    fn test_id_taken_covers_entries() {
        let draft = sample();
        assert!(draft.is_id_taken("c1"));
        assert!(draft.is_id_taken("e1"));
        assert!(!draft.is_id_taken("zz"));
    }

    #[test]
    fn test_fresh_id_is_unused() {
        let draft = sample();
        let id = draft.fresh_id();
        assert!(!draft.is_id_taken(&id));
    }
}
