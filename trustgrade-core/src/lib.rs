//! # Trustgrade Core
//!
//! Evaluation engine for machine-learning artifacts.
//! Provides URL classification, hub and code-host clients, resource handlers,
//! the metric framework, the evaluation orchestrator, configuration, and errors.

pub mod classifier;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod handlers;
pub mod hub;
pub mod metrics;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at the crate root.
pub use classifier::{Category, classify, group};
pub use config::{TrustConfig, load_config};
pub use error::{Result, TrustError};
pub use evaluator::{EvaluationRecord, Evaluator, net_score, parse_batches};
pub use handlers::{CodeHandler, DatasetHandler, ModelHandler, ResourceGroup, ResourceHandler};
pub use hub::ApiClients;
pub use metrics::{HardwareScores, Metric, MetricRegistry, MetricResult, MetricScore};
pub use transport::{HttpTransport, InMemoryTransport, Transport};
