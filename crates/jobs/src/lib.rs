use parking_lot::RwLock;
use seat_core::{BalanceEnvelope, BalanceResult, Balancer};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, error, info};
use utoipa::ToSchema;
use uuid::Uuid;

/// Finished jobs kept around for result and report downloads.
pub const DEFAULT_RETAINED: usize = 256;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done { result: BalanceResult },
    Failed { message: String },
}

#[derive(Default)]
struct Table {
    status: HashMap<String, JobStatus>,
    /// Finished job ids, oldest first.
    finished: VecDeque<String>,
}

impl Table {
    fn finish(&mut self, id: String, status: JobStatus, retain: usize) {
        self.status.insert(id.clone(), status);
        self.finished.push_back(id);
        while self.finished.len() > retain {
            if let Some(old) = self.finished.pop_front() {
                debug!(job = %old, "evicting finished job");
                self.status.remove(&old);
            }
        }
    }
}

/// Runs balancing jobs on the tokio runtime. Only the `retain` most recently
/// finished jobs are remembered; queued and running ones are never evicted.
#[derive(Clone)]
pub struct InMemJobs<B: Balancer> {
    inner: Arc<RwLock<Table>>,
    balancer: Arc<B>,
    retain: usize,
}

impl<B: Balancer> InMemJobs<B> {
    pub fn new(balancer: B) -> Self {
        Self::with_retention(balancer, DEFAULT_RETAINED)
    }

    pub fn with_retention(balancer: B, retain: usize) -> Self {
        Self {
            inner: Default::default(),
            balancer: Arc::new(balancer),
            retain: retain.max(1),
        }
    }

    pub fn enqueue(&self, env: BalanceEnvelope) -> JobId {
        let id = Uuid::new_v4().to_string();
        self.inner.write().status.insert(id.clone(), JobStatus::Queued);

        let table = self.inner.clone();
        let balancer = self.balancer.clone();
        let retain = self.retain;
        let id_for_task = id.clone();

        tokio::spawn(async move {
            table
                .write()
                .status
                .insert(id_for_task.clone(), JobStatus::Running);
            let status = match balancer.balance(env).await {
                Ok(result) => {
                    info!(job = %id_for_task, unassigned = result.counts.unassigned, "job done");
                    JobStatus::Done { result }
                }
                Err(e) => {
                    error!(?e, job = %id_for_task, "job failed");
                    JobStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };
            table.write().finish(id_for_task, status, retain);
        });

        JobId(id)
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().status.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use balancer::HeurBalancer;
    use types::{BalanceParams, Room, Student};

    struct Broken;

    #[async_trait]
    impl Balancer for Broken {
        async fn balance(&self, _env: BalanceEnvelope) -> anyhow::Result<BalanceResult> {
            anyhow::bail!("spreadsheet exploded")
        }
    }

    fn envelope() -> BalanceEnvelope {
        BalanceEnvelope {
            rooms: vec![Room::new("A"), Room::new("B")],
            students: vec![
                Student::new("1", "7A", "F", "G"),
                Student::new("2", "7A", "F", "G"),
                Student::new("3", "8B", "F", "G"),
            ],
            params: BalanceParams {
                seed: Some(11),
                ..BalanceParams::default()
            },
        }
    }

    async fn settle<B: Balancer>(jobs: &InMemJobs<B>, id: &str) -> JobStatus {
        for _ in 0..1000 {
            match jobs.get(id) {
                Some(JobStatus::Queued) | Some(JobStatus::Running) | None => {
                    tokio::task::yield_now().await
                }
                Some(done) => return done,
            }
        }
        panic!("job {id} never finished");
    }

    #[tokio::test]
    async fn finished_job_exposes_result() {
        let jobs = InMemJobs::new(HeurBalancer::new());
        let id = jobs.enqueue(envelope());
        assert!(matches!(
            jobs.get(&id.0),
            Some(JobStatus::Queued) | Some(JobStatus::Running) | Some(JobStatus::Done { .. })
        ));

        let JobStatus::Done { result } = settle(&jobs, &id.0).await else {
            panic!("expected a finished job");
        };
        assert_eq!(result.counts.total, 3);
        assert_eq!(result.counts.unassigned, 0);
    }

    #[tokio::test]
    async fn failure_is_recorded_with_message() {
        let jobs = InMemJobs::new(Broken);
        let id = jobs.enqueue(envelope());
        let JobStatus::Failed { message } = settle(&jobs, &id.0).await else {
            panic!("expected a failed job");
        };
        assert_eq!(message, "spreadsheet exploded");
    }

    #[test]
    fn unknown_job_is_none() {
        let jobs = InMemJobs::new(HeurBalancer::new());
        assert!(jobs.get("nope").is_none());
    }

    #[tokio::test]
    async fn oldest_finished_job_is_evicted() {
        let jobs = InMemJobs::with_retention(HeurBalancer::new(), 2);
        let first = jobs.enqueue(envelope());
        settle(&jobs, &first.0).await;
        let second = jobs.enqueue(envelope());
        settle(&jobs, &second.0).await;
        assert!(jobs.get(&first.0).is_some());

        let third = jobs.enqueue(envelope());
        settle(&jobs, &third.0).await;
        assert!(jobs.get(&first.0).is_none());
        assert!(matches!(jobs.get(&second.0), Some(JobStatus::Done { .. })));
        assert!(matches!(jobs.get(&third.0), Some(JobStatus::Done { .. })));
    }

    #[tokio::test]
    async fn eviction_waits_for_the_next_finish() {
        let jobs = InMemJobs::with_retention(Broken, 1);
        let a = jobs.enqueue(envelope());
        settle(&jobs, &a.0).await;

        let b = jobs.enqueue(envelope());
        assert!(matches!(jobs.get(&b.0), Some(JobStatus::Queued)));
        assert!(matches!(jobs.get(&a.0), Some(JobStatus::Failed { .. })));

        settle(&jobs, &b.0).await;
        assert!(jobs.get(&a.0).is_none());
    }

    #[test]
    fn status_serializes_with_tag() {
        let v = serde_json::to_value(JobStatus::Failed {
            message: "x".into(),
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({"status": "failed", "message": "x"}));
    }
}
