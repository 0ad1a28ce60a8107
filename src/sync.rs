/// Reconciles remote fetch/submit calls with the local dashboard state
use log::{error, info, warn};
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::form::{ReadingForm, ValidationError};
use crate::gateway::SensorGateway;
use crate::models::{Reading, SyncStatus};
use crate::store::ReadingStore;
use crate::utils::{calculate_summary, ReadingSummary};

/// Everything the dashboard displays. Only the controller mutates it.
#[derive(Debug, Default)]
pub struct DashboardState {
    store: ReadingStore,
    status: SyncStatus,
    fetch_in_flight: bool,
    submit_in_flight: bool,
    last_synced: Option<OffsetDateTime>,
}

impl DashboardState {
    // Status once an operation has finished successfully
    fn settle(&mut self) {
        self.status = if self.submit_in_flight {
            SyncStatus::Submitting
        } else if self.fetch_in_flight {
            SyncStatus::Loading
        } else {
            SyncStatus::Idle
        };
    }
}

/// Read-only copy of the dashboard state handed to the rendering layer
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub readings: Vec<Reading>,
    pub status: SyncStatus,
    pub summary: ReadingSummary,
    pub last_synced: Option<OffsetDateTime>,
}

/// What happened to a requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed,
    /// The remote call failed; the status now carries the error
    Failed,
    /// The same kind of operation was already in flight
    Skipped,
}

/// Owns the reading set and sync status and drives them from gateway results.
///
/// The state lock is never held across a gateway call, so a second request
/// issued while one is pending observes the in-flight guard.
pub struct SyncController<G> {
    gateway: G,
    state: RwLock<DashboardState>,
}

impl<G: SensorGateway> SyncController<G> {
    pub fn new(gateway: G) -> Self {
        SyncController {
            gateway,
            state: RwLock::new(DashboardState::default()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Replace the reading set with the service's current one
    ///
    /// On failure the reading set is cleared and the status becomes
    /// `Error`. A refresh requested while another is loading is skipped.
    pub async fn refresh(&self) -> SyncOutcome {
        {
            let mut state = self.state.write().await;
            if state.fetch_in_flight {
                warn!("Refresh requested while a fetch is in flight, ignoring");
                return SyncOutcome::Skipped;
            }
            state.fetch_in_flight = true;
            state.status = SyncStatus::Loading;
        }

        let result = self.gateway.fetch_all().await;

        let mut state = self.state.write().await;
        state.fetch_in_flight = false;
        match result {
            Ok(readings) => {
                info!("Fetched {} readings", readings.len());
                state.store.replace_all(readings);
                state.last_synced = Some(OffsetDateTime::now_utc());
                state.settle();
                SyncOutcome::Completed
            }
            Err(e) => {
                error!("Fetch failed: {}", e);
                state.store.clear();
                state.status = SyncStatus::Error(e.to_string());
                SyncOutcome::Failed
            }
        }
    }

    /// Validate the form and submit it as a new unclassified reading
    ///
    /// Invalid input returns `Err` before any remote call and leaves the
    /// status alone. On success the reading is prepended locally and the
    /// form is cleared; on failure the reading set is kept as it was.
    pub async fn submit(&self, form: &mut ReadingForm) -> Result<SyncOutcome, ValidationError> {
        let candidate = form.validate()?;

        {
            let mut state = self.state.write().await;
            if state.submit_in_flight {
                warn!("Submission requested while another is in flight, ignoring");
                return Ok(SyncOutcome::Skipped);
            }
            state.submit_in_flight = true;
            state.status = SyncStatus::Submitting;
        }

        let result = self.gateway.submit_one(candidate).await;

        let mut state = self.state.write().await;
        state.submit_in_flight = false;
        match result {
            Ok(reading) => {
                info!("Submitted reading {}", reading.id);
                state.store.prepend(reading);
                state.settle();
                form.reset();
                Ok(SyncOutcome::Completed)
            }
            Err(e) => {
                error!("Submission failed: {}", e);
                state.status = SyncStatus::Error(e.to_string());
                Ok(SyncOutcome::Failed)
            }
        }
    }

    pub async fn status(&self) -> SyncStatus {
        self.state.read().await.status.clone()
    }

    pub async fn readings(&self) -> Vec<Reading> {
        self.state.read().await.store.current().to_vec()
    }

    pub async fn summary(&self) -> ReadingSummary {
        calculate_summary(self.state.read().await.store.current())
    }

    pub async fn snapshot(&self) -> DashboardView {
        let state = self.state.read().await;
        let readings = state.store.current().to_vec();
        DashboardView {
            summary: calculate_summary(&readings),
            readings,
            status: state.status.clone(),
            last_synced: state.last_synced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_falls_back_to_pending_operation() {
        let mut state = DashboardState {
            submit_in_flight: true,
            ..Default::default()
        };
        state.settle();
        assert_eq!(state.status, SyncStatus::Submitting);

        state.submit_in_flight = false;
        state.fetch_in_flight = true;
        state.settle();
        assert_eq!(state.status, SyncStatus::Loading);

        state.fetch_in_flight = false;
        state.settle();
        assert_eq!(state.status, SyncStatus::Idle);
    }
}
