//! Quotation contracts
//!
//! - `QuotationBaseContract`: field rules of the quotation form
//! - `QuotationContract`: base rules plus catalog references, run on submit

mod base;
mod submit;

pub use base::QuotationBaseContract;
pub use submit::QuotationContract;
