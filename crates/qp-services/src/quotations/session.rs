//! Quotation editing session
//!
//! Holds the draft for one form and runs a full bottom-up recompute after every
//! mutation. A mutation whose recompute fails is rolled back.

use qp_core::{parse_amount, Id, QpError, QpResult};
use qp_models::{
    CostingGroup, EntryKind, LineEntry, QuotationDraft, ServiceCatalog, ServiceCatalogEntry,
    ServiceType,
};
use tracing::{debug, trace};

use super::observer::DraftObserver;
use crate::pricing::{recompute_quotation, QuotationTotals};

/// Recompute trigger state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeState {
    Idle,
    Dirty,
    Recomputed,
}

/// Editable numeric input of a line entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Hours,
    HourlyCost,
    Quantity,
    UnitPrice,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Hours => "horas",
            EntryField::HourlyCost => "costo",
            EntryField::Quantity => "cantidad",
            EntryField::UnitPrice => "precio_unit",
        }
    }
}

pub struct QuotationSession {
    draft: QuotationDraft,
    catalog: ServiceCatalog,
    observers: Vec<Box<dyn DraftObserver>>,
    state: RecomputeState,
    totals: QuotationTotals,
    passes: u64,
}

impl QuotationSession {
    /// Session over an empty draft
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self {
            draft: QuotationDraft::new(),
            catalog,
            observers: Vec::new(),
            state: RecomputeState::Idle,
            totals: QuotationTotals::default(),
            passes: 0,
        }
    }

    /// Session over an existing draft; derived values are recomputed immediately
    pub fn with_draft(draft: QuotationDraft, catalog: ServiceCatalog) -> QpResult<Self> {
        let mut session = Self::new(catalog);
        session.draft = draft;
        session.recompute()?;
        Ok(session)
    }

    pub fn draft(&self) -> &QuotationDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn totals(&self) -> QuotationTotals {
        self.totals
    }

    pub fn state(&self) -> RecomputeState {
        self.state
    }

    /// Completed recompute passes since the session was created
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn subscribe(&mut self, observer: Box<dyn DraftObserver>) {
        self.observers.push(observer);
    }

    pub fn into_draft(self) -> QuotationDraft {
        self.draft
    }

    /// Append a costing group with a fresh id, returning the id
    pub fn add_costing_group(&mut self) -> QpResult<String> {
        let id = self.draft.fresh_id();
        debug!(costing_id = %id, "add_costing_group");
        self.mutate(|draft, _| {
            draft.costings.push(CostingGroup::new(id.clone()));
            Ok(id)
        })
    }

    pub fn remove_costing_group(&mut self, costing_id: &str) -> QpResult<()> {
        debug!(costing_id, "remove_costing_group");
        self.mutate(|draft, _| {
            draft
                .remove_costing(costing_id)
                .map(|_| ())
                .ok_or_else(|| QpError::not_found("costing", "id", costing_id))
        })
    }

    /// Add an entry whose variant follows the catalog entry's type, returning its id.
    ///
    /// The service must exist in the session catalog with the same type. OTROS services
    /// are rejected up front since they cannot be valuated.
    pub fn add_line_entry(&mut self, costing_id: &str, service: &ServiceCatalogEntry) -> QpResult<String> {
        debug!(costing_id, service_id = service.id, "add_line_entry");

        let known = self.catalog.require(service.id)?;
        if known.service_type != service.service_type {
            return Err(QpError::CatalogMismatch {
                service_id: service.id,
                expected: known.service_type.to_string(),
                found: service.service_type.to_string(),
            });
        }
        if known.service_type == ServiceType::Otros {
            return Err(QpError::UnsupportedVariant {
                variant: known.service_type.to_string(),
            });
        }

        let id = self.draft.fresh_id();
        let entry = LineEntry::for_service(id.clone(), known);
        self.mutate(|draft, _| {
            costing_in(draft, costing_id)?.entries.push(entry);
            Ok(id)
        })
    }

    pub fn remove_line_entry(&mut self, costing_id: &str, entry_id: &str) -> QpResult<()> {
        debug!(costing_id, entry_id, "remove_line_entry");
        self.mutate(|draft, _| {
            costing_in(draft, costing_id)?
                .remove_entry(entry_id)
                .map(|_| ())
                .ok_or_else(|| QpError::not_found("line entry", "id", entry_id))
        })
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> QpResult<()> {
        let subject = subject.into();
        self.mutate(|draft, _| {
            draft.subject = subject;
            Ok(())
        })
    }

    pub fn set_client(&mut self, client_id: Id) -> QpResult<()> {
        debug!(client_id, "set_client");
        self.mutate(|draft, _| {
            draft.client_id = client_id;
            Ok(())
        })
    }

    pub fn set_dates(&mut self, start: impl Into<String>, end: impl Into<String>) -> QpResult<()> {
        let (start, end) = (start.into(), end.into());
        debug!(start = %start, end = %end, "set_dates");
        self.mutate(|draft, _| {
            draft.start_date = start;
            draft.end_date = end;
            Ok(())
        })
    }

    pub fn set_costing_description(&mut self, costing_id: &str, description: impl Into<String>) -> QpResult<()> {
        let description = description.into();
        self.mutate(|draft, _| {
            costing_in(draft, costing_id)?.description = description;
            Ok(())
        })
    }

    /// Set a costing quantity from raw form text
    pub fn set_costing_quantity(&mut self, costing_id: &str, raw: &str) -> QpResult<()> {
        let quantity = parse_amount(raw);
        debug!(costing_id, %quantity, "set_costing_quantity");
        self.mutate(|draft, _| {
            costing_in(draft, costing_id)?.quantity = quantity;
            Ok(())
        })
    }

    pub fn set_entry_description(
        &mut self,
        costing_id: &str,
        entry_id: &str,
        description: impl Into<String>,
    ) -> QpResult<()> {
        let description = description.into();
        self.mutate(|draft, _| {
            entry_in(draft, costing_id, entry_id)?.description = description;
            Ok(())
        })
    }

    /// Set a numeric entry input from raw form text.
    ///
    /// Non-numeric text becomes 0 and negatives are clamped to 0. The field must belong to
    /// the entry's variant.
    pub fn set_entry_field(&mut self, costing_id: &str, entry_id: &str, field: EntryField, raw: &str) -> QpResult<()> {
        let value = parse_amount(raw);
        debug!(costing_id, entry_id, field = field.as_str(), %value, "set_entry_field");
        self.mutate(|draft, _| {
            let entry = entry_in(draft, costing_id, entry_id)?;
            let variant = entry.service_type();
            let slot = match (&mut entry.kind, field) {
                (EntryKind::Area { hours, .. }, EntryField::Hours) => hours,
                (EntryKind::Area { hourly_cost, .. }, EntryField::HourlyCost) => hourly_cost,
                (EntryKind::Servicio { quantity, .. }, EntryField::Quantity) => quantity,
                (EntryKind::Servicio { unit_price, .. }, EntryField::UnitPrice) => unit_price,
                _ => {
                    return Err(QpError::FieldNotApplicable {
                        field: field.as_str(),
                        variant: variant.to_string(),
                    })
                }
            };
            *slot = value;
            Ok(())
        })
    }

    /// Clear the form back to an empty draft
    pub fn reset(&mut self) -> QpResult<()> {
        debug!("reset");
        self.mutate(|draft, _| {
            *draft = QuotationDraft::new();
            Ok(())
        })
    }

    /// Run a recompute pass over the current draft and notify observers
    pub fn recompute(&mut self) -> QpResult<QuotationTotals> {
        self.mutate(|_, _| Ok(()))?;
        Ok(self.totals)
    }

    fn mutate<R>(
        &mut self,
        apply: impl FnOnce(&mut QuotationDraft, &ServiceCatalog) -> QpResult<R>,
    ) -> QpResult<R> {
        let snapshot = self.draft.clone();
        self.state = RecomputeState::Dirty;

        let outcome = apply(&mut self.draft, &self.catalog)
            .and_then(|value| recompute_quotation(&mut self.draft).map(|totals| (value, totals)));

        match outcome {
            Ok((value, totals)) => {
                self.totals = totals;
                self.passes += 1;
                self.state = RecomputeState::Recomputed;
                trace!(total_price = %totals.total_price, days = totals.days, "recompute pass completed");

                for observer in &self.observers {
                    observer.on_recomputed(&totals);
                }

                self.state = RecomputeState::Idle;
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "mutation rejected, draft restored");
                self.draft = snapshot;
                self.state = RecomputeState::Idle;
                Err(err)
            }
        }
    }
}

fn costing_in<'d>(draft: &'d mut QuotationDraft, costing_id: &str) -> QpResult<&'d mut CostingGroup> {
    draft
        .costing_mut(costing_id)
        .ok_or_else(|| QpError::not_found("costing", "id", costing_id))
}

fn entry_in<'d>(draft: &'d mut QuotationDraft, costing_id: &str, entry_id: &str) -> QpResult<&'d mut LineEntry> {
    costing_in(draft, costing_id)?
        .entry_mut(entry_id)
        .ok_or_else(|| QpError::not_found("line entry", "id", entry_id))
}
