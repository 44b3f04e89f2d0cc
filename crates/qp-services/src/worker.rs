//! Background pricing worker
//!
//! Runs recompute passes on a dedicated task. Each request carries a draft and gets the
//! recomputed draft back on a oneshot channel, so callers still see one synchronous
//! request/response per pass.

use qp_core::config::WorkerConfig;
use qp_core::{QpError, QpResult};
use qp_models::QuotationDraft;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::pricing::{recompute_quotation, QuotationTotals};

type Reply = QpResult<(QuotationDraft, QuotationTotals)>;

struct RecomputeRequest {
    draft: QuotationDraft,
    reply: oneshot::Sender<Reply>,
}

/// Cloneable handle used to submit drafts to the worker
#[derive(Clone)]
pub struct PricingWorkerHandle {
    sender: mpsc::Sender<RecomputeRequest>,
}

impl PricingWorkerHandle {
    /// Recompute a draft on the worker and wait for the result
    pub async fn recompute(&self, draft: QuotationDraft) -> Reply {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(RecomputeRequest { draft, reply })
            .await
            .map_err(|_| QpError::WorkerUnavailable("request queue closed".into()))?;

        response
            .await
            .map_err(|_| QpError::WorkerUnavailable("worker dropped the request".into()))?
    }
}

pub struct PricingWorker {
    receiver: mpsc::Receiver<RecomputeRequest>,
}

impl PricingWorker {
    /// Start the worker on the current runtime.
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn(config: &WorkerConfig) -> (PricingWorkerHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let worker = PricingWorker { receiver };
        let task = tokio::spawn(worker.run());
        (PricingWorkerHandle { sender }, task)
    }

    async fn run(mut self) {
        tracing::info!("Pricing worker started");

        while let Some(RecomputeRequest { mut draft, reply }) = self.receiver.recv().await {
            let outcome = recompute_quotation(&mut draft).map(|totals| (draft, totals));
            if let Err(e) = &outcome {
                tracing::error!(error = %e, "Pricing worker recompute failed");
            }
            if reply.send(outcome).is_err() {
                tracing::debug!("Recompute requester went away before the reply");
            }
        }

        tracing::info!("Pricing worker stopped");
    }
}
