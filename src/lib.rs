pub mod config;
pub mod form;
pub mod gateway;
pub mod models;
pub mod store;
pub mod sync;
pub mod utils;
pub mod view;

pub use form::{ReadingForm, ValidationError};
pub use gateway::{GatewayError, HttpGateway, SensorGateway};
pub use models::{Label, Metric, Reading, ReadingInput, SyncStatus};
pub use store::ReadingStore;
pub use sync::{DashboardView, SyncController, SyncOutcome};
pub use utils::{calculate_summary, format_two_decimals, MetricSummary, ReadingSummary};
