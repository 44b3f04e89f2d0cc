//! Submit Service for Quotations
//!
//! Produces the document posted to the `cotizaciones` resource. Sending it is left to the
//! caller.

use qp_contracts::base::Contract;
use qp_contracts::quotations::QuotationContract;
use qp_models::{QuotationDocument, QuotationDraft, ServiceCatalog};
use tracing::debug;

use crate::pricing::recompute_quotation;
use crate::result::ServiceResult;

pub struct SubmitQuotationService<'a> {
    catalog: Option<&'a ServiceCatalog>,
}

impl<'a> SubmitQuotationService<'a> {
    /// Field rules only
    pub fn new() -> Self {
        Self { catalog: None }
    }

    /// Also check every service reference against the catalog
    pub fn with_catalog(catalog: &'a ServiceCatalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// Recompute a copy of the draft, validate it and build the document
    pub fn call(&self, draft: &QuotationDraft) -> ServiceResult<QuotationDocument> {
        let mut draft = draft.clone();
        if let Err(err) = recompute_quotation(&mut draft) {
            return ServiceResult::failure_with_base_error(err.to_string());
        }
        self.build(&draft)
    }

    /// Validate a draft whose figures are already recomputed and build the document
    pub fn build(&self, draft: &QuotationDraft) -> ServiceResult<QuotationDocument> {
        let contract = match self.catalog {
            Some(catalog) => QuotationContract::with_catalog(catalog),
            None => QuotationContract::new(),
        };
        if let Err(errors) = contract.validate(draft) {
            debug!(error_count = errors.full_messages().len(), "quotation rejected by contract");
            return ServiceResult::failure(errors);
        }

        ServiceResult::success(QuotationDocument::from(draft))
    }
}

impl Default for SubmitQuotationService<'_> {
    fn default() -> Self {
        Self::new()
    }
}
