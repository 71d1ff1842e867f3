use crate::domain::model::{GenerateResult, ServiceCatalogEntry, ServiceIdentifier};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn services(&self) -> &[String];
    fn icon_base_url(&self) -> &str;
    fn icon_extension(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn template_path(&self) -> Option<&str>;
    fn placeholder(&self) -> &str;
    fn concurrent_probes(&self) -> usize;
}

/// 服務清單來源（遠端列表 API 或固定清單）
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ServiceCatalogEntry>>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    async fn fetch(&self) -> Result<Vec<ServiceCatalogEntry>> {
        (**self).fetch().await
    }
}

/// 圖示是否存在的網路探測。失敗時回傳錯誤，由 `IconOracle` 轉成「不存在」
#[async_trait]
pub trait IconProbe: Send + Sync {
    async fn probe(&self, identifier: &ServiceIdentifier) -> Result<bool>;
}

#[async_trait]
impl<T: IconProbe + ?Sized> IconProbe for std::sync::Arc<T> {
    async fn probe(&self, identifier: &ServiceIdentifier) -> Result<bool> {
        (**self).probe(identifier).await
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ServiceIdentifier>>;
    async fn transform(&self, selection: Vec<ServiceIdentifier>) -> Result<GenerateResult>;
    async fn load(&self, result: GenerateResult) -> Result<String>;
}
