use clap::Parser;
use std::sync::Arc;
use svc_configgen::config::toml_config::TomlConfig;
use svc_configgen::core::inference::domain_of_record;
use svc_configgen::core::{CatalogSource, ConfigProvider};
use svc_configgen::utils::error::ErrorSeverity;
use svc_configgen::utils::{logger, validation::Validate};
use svc_configgen::{
    Catalog, GeneratorEngine, GeneratorPipeline, GitTreeCatalog, HttpIconProbe, IconCache,
    LocalStorage, RuleTables, ServiceIdentifier, StaticCatalog,
};

#[derive(Parser)]
#[command(name = "toml-gen")]
#[command(about = "Service configuration generator driven by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "svc-configgen.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show the selection and domain-of-record without probing icons
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    let catalog: Box<dyn CatalogSource> = match &config.catalog {
        Some(catalog) => Box::new(GitTreeCatalog::new(
            &catalog.endpoint,
            config.catalog_prefix(),
            config.catalog_extension(),
        )),
        None => Box::new(StaticCatalog::default()),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No icon probes or output will be made");
        perform_dry_run(&config, catalog.as_ref()).await?;
        return Ok(());
    }

    let mut probe = HttpIconProbe::new(config.icon_base_url(), config.icon_extension());
    if let Some(timeout) = config.probe_timeout() {
        probe = probe.with_timeout(timeout);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = GeneratorPipeline::new(storage, config, catalog, probe, Arc::new(IconCache::new()));
    let engine = GeneratorEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Generation completed successfully!");
            println!("✅ Generation completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Services: {}", config.services().join(", "));
    match &config.catalog {
        Some(catalog) => println!("  Catalog: {}", catalog.endpoint),
        None => println!("  Catalog: (none, selection used as-is)"),
    }
    println!(
        "  Icons: {}/<id>.{}",
        config.icon_base_url(),
        config.icon_extension()
    );
    println!("  Concurrent Probes: {}", config.concurrent_probes());
    println!(
        "  Template: {}",
        config.template_path().unwrap_or("(built-in)")
    );
    println!("  Output: {}/{}", config.output_path(), config.output_file());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    config: &TomlConfig,
    catalog: &dyn CatalogSource,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let loaded = Catalog::load(catalog).await?;
    println!("📚 Catalog entries: {}", loaded.len());
    println!();

    let tables = RuleTables::builtin();
    println!("🔄 Domain of record per service:");
    for raw in config.services() {
        let identifier = ServiceIdentifier::parse(raw)?;
        if !loaded.is_empty() && !loaded.contains(&identifier) {
            println!("  {} -> (not in catalog, skipped)", identifier);
            continue;
        }
        if let Some(alias) = tables.alias(identifier.as_str()) {
            println!("  {} -> alias of {}", identifier, alias);
            continue;
        }
        println!("  {} -> {}", identifier, domain_of_record(&tables, &identifier));
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
