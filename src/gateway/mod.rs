pub mod client;
pub mod payload;

use thiserror::Error;

use crate::models::{Reading, ReadingInput};

pub use client::HttpGateway;
pub use payload::coerce_readings;

/// Failure of a call to the collection service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    /// The request never completed or the body could not be read
    #[error("{message}")]
    Transport { message: String },
}

/// The two operations the collection service supports.
///
/// Implemented over HTTP by [`HttpGateway`]; tests substitute in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait SensorGateway {
    /// Retrieve every reading the service currently holds
    async fn fetch_all(&self) -> Result<Vec<Reading>, GatewayError>;

    /// Submit one unclassified reading, returning it with its assigned id
    async fn submit_one(&self, candidate: ReadingInput) -> Result<Reading, GatewayError>;
}
