use crate::config::Settings;
use async_trait::async_trait;
use balancer::HeurBalancer;
use jobs::InMemJobs;
use seat_core::{BalanceEnvelope, BalanceResult, Balancer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<InMemJobs<SeatingBalancer>>,
    pub settings: Arc<Settings>,
}

/// Normalizes incoming envelopes before handing them to the heuristic.
#[derive(Clone)]
pub struct SeatingBalancer {
    heur: Arc<HeurBalancer>,
}

impl SeatingBalancer {
    pub fn new() -> Self {
        Self {
            heur: Arc::new(HeurBalancer::new()),
        }
    }
}

impl Default for SeatingBalancer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Balancer for SeatingBalancer {
    async fn balance(&self, env: BalanceEnvelope) -> anyhow::Result<BalanceResult> {
        self.heur.balance(seat_core::normalize(env)).await
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            jobs: Arc::new(InMemJobs::with_retention(
                SeatingBalancer::new(),
                settings.jobs_retained,
            )),
            settings: Arc::new(settings),
        }
    }

    pub fn new_default() -> Self {
        Self::new(Settings::default())
    }
}
