//! Quotation services
//!
//! The editing session keeps a draft consistent after every mutation; load and submit
//! convert between the session and the submission document.

mod load;
mod observer;
mod session;
mod submit;

pub use load::LoadQuotationService;
pub use observer::DraftObserver;
#[cfg(test)]
pub use observer::MockDraftObserver;
pub use session::{EntryField, QuotationSession, RecomputeState};
pub use submit::SubmitQuotationService;
