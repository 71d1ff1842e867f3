use clap::Parser;
use std::sync::Arc;
use svc_configgen::core::{CatalogSource, Storage};
use svc_configgen::utils::error::{ErrorSeverity, GenError};
use svc_configgen::utils::{logger, validation::Validate};
use svc_configgen::{
    Catalog, CliConfig, GeneratorEngine, GeneratorPipeline, GitTreeCatalog, HttpIconProbe,
    IconCache, LocalStorage, StaticCatalog, StdoutStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting svc-configgen");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog: Box<dyn CatalogSource> = match &config.catalog_endpoint {
        Some(endpoint) => Box::new(GitTreeCatalog::new(
            endpoint,
            &config.catalog_prefix,
            &config.catalog_extension,
        )),
        None => Box::new(StaticCatalog::default()),
    };

    if let Some(query) = &config.search {
        match Catalog::load(&catalog).await {
            Ok(loaded) => {
                let hits = loaded.search(query);
                if hits.is_empty() {
                    println!("No services match '{}'", query);
                }
                for entry in hits {
                    println!("{}\t{}", entry.identifier, entry.source_path);
                }
                return Ok(());
            }
            Err(e) => exit_with(e),
        }
    }

    let outcome = if config.stdout {
        generate(StdoutStorage, config.clone(), catalog).await
    } else {
        let storage = LocalStorage::new(config.output_path.clone());
        generate(storage, config.clone(), catalog).await
    };

    match outcome {
        Ok(output_path) => {
            tracing::info!("✅ Generation completed successfully!");
            if !config.stdout {
                println!("📁 Output saved to: {}", output_path);
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn generate<S: Storage>(
    storage: S,
    config: CliConfig,
    catalog: Box<dyn CatalogSource>,
) -> svc_configgen::Result<String> {
    let probe = HttpIconProbe::new(&config.icon_base_url, &config.icon_extension);
    let pipeline = GeneratorPipeline::new(storage, config, catalog, probe, Arc::new(IconCache::new()));
    GeneratorEngine::new(pipeline).run().await
}

fn exit_with(e: GenError) -> ! {
    tracing::error!(
        "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
