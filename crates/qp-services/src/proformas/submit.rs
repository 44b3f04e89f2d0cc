//! Submit Service for Proformas

use qp_contracts::base::Contract;
use qp_contracts::proformas::ProformaContract;
use qp_core::config::PricingConfig;
use qp_models::ProformaDraft;
use rust_decimal::Decimal;
use tracing::debug;

use super::pricing::recompute_proforma;
use crate::result::ServiceResult;

/// Recomputes a proforma and validates it for the `proformas` resource
pub struct SubmitProformaService {
    igv_rate: Decimal,
}

impl SubmitProformaService {
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            igv_rate: config.igv_rate,
        }
    }

    pub fn call(&self, proforma: &ProformaDraft) -> ServiceResult<ProformaDraft> {
        let mut proforma = proforma.clone();
        let totals = match recompute_proforma(&mut proforma, self.igv_rate) {
            Ok(totals) => totals,
            Err(err) => return ServiceResult::failure_with_base_error(err.to_string()),
        };
        debug!(total_amount = %totals.total_amount, lines = proforma.lines.len(), "proforma recomputed");

        let validation = ProformaContract::new().validate(&proforma);
        ServiceResult::validated(proforma, validation)
    }
}
