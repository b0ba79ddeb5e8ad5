//! Handlers built for one evaluation batch.

use super::{CodeHandler, DatasetHandler, ModelHandler, ResourceHandler};
use crate::classifier::Category;
use crate::hub::ApiClients;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The resource handles of one batch, in input order per category.
///
/// Variant-typed lists let metrics reach variant-only queries (size,
/// benchmarks, quality) without downcasting.
#[derive(Clone, Default)]
pub struct ResourceGroup {
    models: Vec<Arc<ModelHandler>>,
    datasets: Vec<Arc<DatasetHandler>>,
    code: Vec<Arc<CodeHandler>>,
}

impl ResourceGroup {
    pub fn new(
        models: Vec<Arc<ModelHandler>>,
        datasets: Vec<Arc<DatasetHandler>>,
        code: Vec<Arc<CodeHandler>>,
    ) -> Self {
        Self {
            models,
            datasets,
            code,
        }
    }

    /// Build one handler per classified URL. URLs whose handler cannot be
    /// constructed are logged and left out.
    pub fn build(grouped: &BTreeMap<Category, Vec<String>>, clients: &ApiClients) -> Self {
        let urls = |category: Category| grouped.get(&category).map(Vec::as_slice).unwrap_or(&[]);

        let models = urls(Category::Model)
            .iter()
            .filter_map(|url| match ModelHandler::new(url, clients.hub.clone()) {
                Ok(handler) => Some(Arc::new(handler)),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Failed to create model handler");
                    None
                }
            })
            .collect();
        let datasets = urls(Category::Dataset)
            .iter()
            .filter_map(|url| match DatasetHandler::new(url, clients.hub.clone()) {
                Ok(handler) => Some(Arc::new(handler)),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Failed to create dataset handler");
                    None
                }
            })
            .collect();
        let code = urls(Category::Code)
            .iter()
            .filter_map(|url| match CodeHandler::new(url, clients.code_host.clone()) {
                Ok(handler) => Some(Arc::new(handler)),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Failed to create code handler");
                    None
                }
            })
            .collect();

        Self::new(models, datasets, code)
    }

    pub fn models(&self) -> &[Arc<ModelHandler>] {
        &self.models
    }

    pub fn datasets(&self) -> &[Arc<DatasetHandler>] {
        &self.datasets
    }

    pub fn code(&self) -> &[Arc<CodeHandler>] {
        &self.code
    }

    /// The handle single-model metrics consult, regardless of which model is being scored.
    pub fn first_model(&self) -> Option<&Arc<ModelHandler>> {
        self.models.first()
    }

    pub fn first_dataset(&self) -> Option<&Arc<DatasetHandler>> {
        self.datasets.first()
    }

    pub fn first_code(&self) -> Option<&Arc<CodeHandler>> {
        self.code.first()
    }

    /// Every handle in `categories`, as the shared capability set.
    pub fn handlers(&self, categories: &[Category]) -> Vec<Arc<dyn ResourceHandler>> {
        let mut out: Vec<Arc<dyn ResourceHandler>> = Vec::new();
        for category in categories {
            match category {
                Category::Model => out.extend(
                    self.models
                        .iter()
                        .map(|h| h.clone() as Arc<dyn ResourceHandler>),
                ),
                Category::Dataset => out.extend(
                    self.datasets
                        .iter()
                        .map(|h| h.clone() as Arc<dyn ResourceHandler>),
                ),
                Category::Code => out.extend(
                    self.code
                        .iter()
                        .map(|h| h.clone() as Arc<dyn ResourceHandler>),
                ),
                Category::Unknown => {}
            }
        }
        out
    }

    /// A view holding only the listed categories; the rest are empty.
    pub fn restricted_to(&self, categories: &[Category]) -> Self {
        let keep = |category| categories.contains(&category);
        Self {
            models: if keep(Category::Model) {
                self.models.clone()
            } else {
                Vec::new()
            },
            datasets: if keep(Category::Dataset) {
                self.datasets.clone()
            } else {
                Vec::new()
            },
            code: if keep(Category::Code) {
                self.code.clone()
            } else {
                Vec::new()
            },
        }
    }

    pub fn len(&self) -> usize {
        self.models.len() + self.datasets.len() + self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
