//! The boundary to the remote calculation service.
//!
//! The severance arithmetic runs remotely; this crate only knows how to send
//! a [`FormSnapshot`] and interpret the answer. [`CalculationService`] is
//! the seam the pipeline depends on, and [`HttpCalculationService`] is the
//! real implementation.

mod http;

pub use http::HttpCalculationService;

use async_trait::async_trait;

use crate::error::RescisaoResult;
use crate::models::{FormSnapshot, ResultRecord};

/// Computes a severance breakdown for a snapshot.
///
/// One call is one request attempt; implementations must not retry.
#[async_trait]
pub trait CalculationService: Send + Sync {
    /// Requests the breakdown for `snapshot`.
    ///
    /// Errors are `Communication` for transport failures, non-success
    /// statuses and unusable payloads, and `ServerReported` when the service
    /// answered with a logical failure.
    async fn calculate(&self, snapshot: &FormSnapshot) -> RescisaoResult<ResultRecord>;
}
