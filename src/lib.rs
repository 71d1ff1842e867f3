pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GitTreeCatalog, HttpIconProbe};
pub use config::cli::{LocalStorage, StdoutStorage};
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use self::core::{
    batch::{spawn_renderer, BatchCoordinator, RenderedBatch},
    catalog::{Catalog, StaticCatalog},
    decompose::decompose,
    engine::GeneratorEngine,
    icons::{IconCache, IconOracle},
    inference::InferenceEngine,
    pipeline::GeneratorPipeline,
    selection::SelectionStore,
    serializer::{serialize, serialize_all},
    tables::RuleTables,
    template::splice,
};
pub use domain::model::{
    DomainParts, GenerateResult, ServiceCatalogEntry, ServiceConfigRecord, ServiceIdentifier,
};
pub use utils::error::{GenError, Result};
