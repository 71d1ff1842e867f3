pub mod batch;
pub mod catalog;
pub mod decompose;
pub mod engine;
pub mod icons;
pub mod inference;
pub mod pipeline;
pub mod selection;
pub mod serializer;
pub mod tables;
pub mod template;

pub use crate::domain::model::{
    DomainParts, GenerateResult, ServiceCatalogEntry, ServiceConfigRecord, ServiceIdentifier,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, IconProbe, Pipeline, Storage};
pub use crate::utils::error::Result;
