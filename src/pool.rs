//! The dispatch engine: a fixed pool of workers with timeout racing and
//! bounded retries
//!
//! The dispatcher seeds a shared job queue with up to `concurrency` targets,
//! then drains a results queue until exactly as many outcomes as submitted
//! jobs have arrived. Workers both consume from and produce to the job queue:
//! a failed or timed-out attempt below the retry ceiling is re-submitted and
//! may be picked up by any worker. The job queue is unbounded so a worker
//! re-submitting a retry can never wedge behind a full queue while every
//! other worker is doing the same.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::job::{Job, JobOutcome};
use crate::renderer::Renderer;
use crate::{Error, Viewport};

/// Tunables for the worker pool. The defaults preserve the reference
/// behavior: 50 workers, one retry, a 120 second attempt deadline.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of concurrent worker tasks. May exceed the number of submitted
    /// jobs; surplus workers simply never dequeue anything.
    pub workers: usize,
    /// Additional attempts permitted after the first.
    pub retry_ceiling: u32,
    /// Per-attempt deadline raced against the renderer.
    pub attempt_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 50,
            retry_ceiling: 1,
            attempt_timeout: Duration::from_secs(120),
        }
    }
}

/// Seeds the job queue, runs the worker pool, and accounts for completions.
pub struct Dispatcher<R> {
    renderer: Arc<R>,
    sizes: Arc<Vec<Viewport>>,
    config: PoolConfig,
}

impl<R: Renderer + 'static> Dispatcher<R> {
    pub fn new(renderer: R, sizes: Vec<Viewport>, config: PoolConfig) -> Self {
        Self {
            renderer: Arc::new(renderer),
            sizes: Arc::new(sizes),
            config,
        }
    }

    /// The shared renderer backing this dispatcher.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Submit up to `concurrency` targets and block until every submitted job
    /// has resolved.
    ///
    /// Exactly `min(concurrency, targets.len())` jobs are submitted; targets
    /// beyond the cap are never processed (a deliberate capacity cap).
    /// Outcomes arrive in receipt order, not submission order, and exactly
    /// one outcome is returned per submitted job.
    pub async fn run(&self, targets: &[String], concurrency: usize) -> Vec<JobOutcome> {
        let submitted = concurrency.min(targets.len());
        if submitted == 0 {
            return Vec::new();
        }

        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel::<Job>();
        let jobs_rx = Arc::new(Mutex::new(jobs_rx));
        let (results_tx, mut results_rx) = mpsc::channel::<JobOutcome>(submitted);

        let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            workers.push(tokio::spawn(worker_loop(
                id,
                Arc::clone(&jobs_rx),
                jobs_tx.clone(),
                results_tx.clone(),
                Arc::clone(&self.renderer),
                Arc::clone(&self.sizes),
                self.config.clone(),
            )));
        }
        drop(results_tx);

        for target in &targets[..submitted] {
            let _ = jobs_tx.send(Job::new(target.clone()));
        }

        let mut outcomes = Vec::with_capacity(submitted);
        while outcomes.len() < submitted {
            match results_rx.recv().await {
                Some(outcome) => outcomes.push(outcome),
                None => {
                    warn!(
                        "results channel closed after {} of {submitted} outcomes",
                        outcomes.len()
                    );
                    break;
                }
            }
        }

        // Every submitted job has resolved; the remaining workers are parked
        // on an empty job queue and will never see another job.
        for worker in &workers {
            worker.abort();
        }

        outcomes
    }
}

async fn worker_loop<R: Renderer + 'static>(
    id: usize,
    jobs_rx: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    jobs_tx: mpsc::UnboundedSender<Job>,
    results_tx: mpsc::Sender<JobOutcome>,
    renderer: Arc<R>,
    sizes: Arc<Vec<Viewport>>,
    config: PoolConfig,
) {
    loop {
        let job = { jobs_rx.lock().await.recv().await };
        let Some(mut job) = job else { break };

        debug!(
            "worker {id} starting {} (attempt {})",
            job.target, job.attempt
        );

        // A job past the ceiling is being given up on; the renderer is not
        // invoked again.
        if job.attempt > config.retry_ceiling {
            let _ = results_tx.send(job.into_given_up()).await;
            continue;
        }

        let attempt = {
            let renderer = Arc::clone(&renderer);
            let sizes = Arc::clone(&sizes);
            let target = job.target.clone();
            tokio::task::spawn_blocking(move || renderer.render(&target, &sizes))
        };

        match tokio::time::timeout(config.attempt_timeout, attempt).await {
            Err(_) => {
                // The deadline is advisory, not forcible: the render keeps
                // running on its blocking thread and its eventual result is
                // discarded.
                debug!(
                    "worker {id} timed out on {} (attempt {})",
                    job.target, job.attempt
                );
                job.record_failure(Error::AttemptTimeout(config.attempt_timeout));
                let _ = jobs_tx.send(job);
            }
            Ok(Err(join_err)) => {
                job.record_failure(Error::Capture(format!("render task aborted: {join_err}")));
                let _ = jobs_tx.send(job);
            }
            Ok(Ok(Err(err))) => {
                debug!(
                    "worker {id} attempt {} failed on {}: {err}",
                    job.attempt, job.target
                );
                job.record_failure(err);
                let _ = jobs_tx.send(job);
            }
            Ok(Ok(Ok(()))) => {
                let _ = results_tx.send(job.into_succeeded()).await;
            }
        }
    }
}
