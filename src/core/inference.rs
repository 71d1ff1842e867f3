use crate::core::decompose::decompose_with;
use crate::core::icons::IconOracle;
use crate::core::tables::RuleTables;
use crate::domain::model::{ServiceConfigRecord, ServiceIdentifier};
use crate::domain::ports::IconProbe;

/// 查詢特例表，未命中時使用 `<identifier>.com`
pub fn domain_of_record(tables: &RuleTables, identifier: &ServiceIdentifier) -> String {
    tables
        .special_case(identifier.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.com", identifier))
}

/// 依識別碼推論單一服務的設定紀錄。
///
/// 規則依序為：別名表、特例網域表（否則 `<id>.com`）、圖示檢查與網域拆解，
/// 最後套用顯示名稱表。推論不會失敗，拆解錯誤會退回完整網域。
pub struct InferenceEngine<P: IconProbe> {
    oracle: IconOracle<P>,
    tables: RuleTables,
}

impl<P: IconProbe> InferenceEngine<P> {
    pub fn new(oracle: IconOracle<P>, tables: RuleTables) -> Self {
        Self { oracle, tables }
    }

    pub fn oracle(&self) -> &IconOracle<P> {
        &self.oracle
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn domain_of_record(&self, identifier: &ServiceIdentifier) -> String {
        domain_of_record(&self.tables, identifier)
    }

    pub async fn infer(&self, identifier: &ServiceIdentifier) -> ServiceConfigRecord {
        let record = self.infer_shape(identifier).await;

        match self.tables.display_name(identifier.as_str()) {
            Some(display) => record.with_name(display.to_string()),
            None => record,
        }
    }

    async fn infer_shape(&self, identifier: &ServiceIdentifier) -> ServiceConfigRecord {
        let name = identifier.to_string();

        if let Some(alias) = self.tables.alias(identifier.as_str()) {
            tracing::debug!("🔗 {} is aliased to {}", identifier, alias);
            return ServiceConfigRecord::Aliased {
                name,
                alias: alias.to_string(),
            };
        }

        let domain = self.domain_of_record(identifier);

        if !self.oracle.exists(identifier).await {
            tracing::debug!("🌐 {} has no icon, using full domain {}", identifier, domain);
            return ServiceConfigRecord::FullDomain { name, domain };
        }

        match decompose_with(&self.tables, &domain) {
            Ok(parts) if parts.second_level.eq_ignore_ascii_case(identifier.as_str()) => {
                ServiceConfigRecord::TldOnly {
                    name,
                    tld: parts.top_level,
                }
            }
            Ok(parts) => ServiceConfigRecord::SldTld {
                name,
                sld: parts.second_level,
                tld: parts.top_level,
            },
            Err(e) => {
                tracing::warn!("⚠️ {}: {}, falling back to full domain", identifier, e);
                ServiceConfigRecord::FullDomain { name, domain }
            }
        }
    }
}
