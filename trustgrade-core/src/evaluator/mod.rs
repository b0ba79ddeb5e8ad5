//! Evaluation orchestrator.
//!
//! One batch of related URLs is classified, handlers are built for it, and
//! every registered metric runs concurrently (bounded by `max_workers`)
//! against the batch's resource group. Each MODEL handle in the batch yields
//! one [`EvaluationRecord`]. Batches never share handlers.

pub mod aggregate;
pub mod input;
pub mod record;

pub use aggregate::{MetricResults, NetScore, WEIGHTS, net_score};
pub use input::{parse_batches, read_batches};
pub use record::EvaluationRecord;

use crate::classifier::group;
use crate::config::TrustConfig;
use crate::error::{MetricError, Result};
use crate::handlers::ResourceGroup;
use crate::hub::ApiClients;
use crate::metrics::{MetricRegistry, MetricResult};
use crate::transport::{HttpTransport, Transport};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Runs the metric registry over batches of URLs.
pub struct Evaluator {
    clients: ApiClients,
    registry: Arc<MetricRegistry>,
    max_workers: usize,
}

impl Evaluator {
    /// Evaluator over the real HTTP transport.
    pub fn new(config: &TrustConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Evaluator over any transport, with the built-in metrics.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &TrustConfig) -> Self {
        Self {
            clients: ApiClients::new(transport, config),
            registry: Arc::new(MetricRegistry::builtin()),
            max_workers: config.evaluator.worker_width(),
        }
    }

    /// Replace the metric set.
    pub fn with_registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Evaluate one batch and return a record per constructed MODEL handle, in input order.
    pub async fn evaluate_urls<S: AsRef<str>>(&self, urls: &[S]) -> Vec<EvaluationRecord> {
        let grouped = group(urls.iter());
        let resources = ResourceGroup::build(&grouped, &self.clients);

        let mut records = Vec::with_capacity(resources.models().len());
        for model in resources.models() {
            let start = Instant::now();
            let results = self.run_metrics(&resources).await;
            let net = net_score(&results);
            tracing::info!(
                model = %model.model_id(),
                net_score = net.score,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Model evaluated"
            );
            records.push(EvaluationRecord::new(model.display_name(), net, &results));
        }
        records
    }

    /// Evaluate each batch independently and concatenate the records.
    pub async fn evaluate_batches(&self, batches: &[Vec<String>]) -> Vec<EvaluationRecord> {
        let mut records = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            tracing::info!(line = index + 1, urls = batch.len(), "Processing batch");
            records.extend(self.evaluate_urls(batch.as_slice()).await);
        }
        records
    }

    /// Evaluate a batch file. An unreadable file yields no records.
    pub async fn evaluate_file(&self, path: &Path) -> Vec<EvaluationRecord> {
        tracing::info!(path = %path.display(), "Starting evaluation of URL file");
        let batches = match read_batches(path).await {
            Ok(batches) => batches,
            Err(e) => {
                tracing::error!(error = %e, "Could not read URL file");
                return Vec::new();
            }
        };
        let records = self.evaluate_batches(&batches).await;
        tracing::info!(results = records.len(), "Evaluation completed");
        records
    }

    /// Run every registered metric on its own task and collect results by name.
    async fn run_metrics(&self, resources: &ResourceGroup) -> MetricResults {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = FuturesUnordered::new();

        for metric in self.registry.iter() {
            let metric = metric.clone();
            let resources = resources.clone();
            let permits = semaphore.clone();
            let name = metric.name();

            let handle = tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return MetricResult::failed();
                };
                metric.calculate(&resources).await
            });
            tasks.push(async move { (name, handle.await) });
        }

        let mut results = MetricResults::new();
        while let Some((name, outcome)) = tasks.next().await {
            let result = match outcome {
                Ok(result) => result,
                Err(e) => {
                    let err = MetricError::Aborted {
                        metric: name.to_string(),
                        message: e.to_string(),
                    };
                    tracing::error!(error = %err, "Metric task failed");
                    MetricResult::failed()
                }
            };
            tracing::debug!(
                metric = name,
                score = result.score.flatten(),
                latency_ms = result.latency_ms,
                "Metric finished"
            );
            results.insert(name.to_string(), result);
        }
        results
    }
}
