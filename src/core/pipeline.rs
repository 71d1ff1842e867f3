use crate::core::batch::BatchCoordinator;
use crate::core::catalog::Catalog;
use crate::core::icons::{IconCache, IconOracle};
use crate::core::inference::InferenceEngine;
use crate::core::selection::SelectionStore;
use crate::core::serializer::serialize_all;
use crate::core::tables::RuleTables;
use crate::core::template::{splice, DEFAULT_TEMPLATE};
use crate::core::{CatalogSource, ConfigProvider, GenerateResult, IconProbe, Pipeline, Storage};
use crate::domain::model::ServiceIdentifier;
use crate::utils::error::{GenError, Result};
use std::sync::Arc;

pub struct GeneratorPipeline<S: Storage, C: ConfigProvider, K: CatalogSource, P: IconProbe> {
    storage: S,
    config: C,
    catalog: K,
    coordinator: BatchCoordinator<P>,
}

impl<S, C, K, P> GeneratorPipeline<S, C, K, P>
where
    S: Storage,
    C: ConfigProvider,
    K: CatalogSource,
    P: IconProbe,
{
    pub fn new(storage: S, config: C, catalog: K, probe: P, cache: Arc<IconCache>) -> Self {
        Self::with_tables(storage, config, catalog, probe, cache, RuleTables::builtin())
    }

    pub fn with_tables(
        storage: S,
        config: C,
        catalog: K,
        probe: P,
        cache: Arc<IconCache>,
        tables: RuleTables,
    ) -> Self {
        let engine = InferenceEngine::new(IconOracle::new(probe, cache), tables);
        let coordinator = BatchCoordinator::new(engine, config.concurrent_probes());
        Self {
            storage,
            config,
            catalog,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &BatchCoordinator<P> {
        &self.coordinator
    }

    async fn load_template(&self) -> Result<String> {
        match self.config.template_path() {
            Some(path) => {
                tracing::debug!("Reading template from {}", path);
                Ok(tokio::fs::read_to_string(path).await?)
            }
            None => Ok(DEFAULT_TEMPLATE.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl<S, C, K, P> Pipeline for GeneratorPipeline<S, C, K, P>
where
    S: Storage,
    C: ConfigProvider,
    K: CatalogSource,
    P: IconProbe,
{
    async fn extract(&self) -> Result<Vec<ServiceIdentifier>> {
        if self.config.services().is_empty() {
            return Err(GenError::MissingConfigError {
                field: "services".to_string(),
            });
        }

        let catalog = Catalog::load(&self.catalog).await?;
        let mut selection = SelectionStore::new();

        for raw in self.config.services() {
            let identifier = ServiceIdentifier::parse(raw)?;

            // 清單為空時不做檢查
            if !catalog.is_empty() && !catalog.contains(&identifier) {
                tracing::warn!("⚠️ {} is not in the catalog, skipping", identifier);
                continue;
            }

            if !selection.add(identifier.clone()) {
                tracing::debug!("{} selected more than once, keeping the first", identifier);
            }
        }

        if selection.is_empty() {
            tracing::warn!("Nothing selected, output will contain no services");
        }

        Ok(selection.list().to_vec())
    }

    async fn transform(&self, selection: Vec<ServiceIdentifier>) -> Result<GenerateResult> {
        let records = self.coordinator.infer_all(&selection).await;
        let fragment = serialize_all(&records);
        Ok(GenerateResult { records, fragment })
    }

    async fn load(&self, result: GenerateResult) -> Result<String> {
        let template = self.load_template().await?;
        let rendered = splice(&template, self.config.placeholder(), &result.fragment)?;

        let file_name = self.config.output_file();
        tracing::debug!(
            "Writing {} records ({} bytes) to storage",
            result.records.len(),
            rendered.len()
        );
        self.storage.write_file(file_name, rendered.as_bytes()).await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            file_name
        ))
    }
}
