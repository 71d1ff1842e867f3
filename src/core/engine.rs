use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct GeneratorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GeneratorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting generation...");

        // Extract
        tracing::info!("Resolving selection against catalog...");
        let selection = self.pipeline.extract().await?;
        tracing::info!("Selected {} services", selection.len());

        // Transform
        tracing::info!("Inferring service configuration...");
        let result = self.pipeline.transform(selection).await?;
        tracing::info!("Generated {} records", result.records.len());

        // Load
        tracing::info!("Rendering template...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
