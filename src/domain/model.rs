use crate::utils::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 服務識別碼，例如 `github`、`google-drive`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentifier(String);

impl ServiceIdentifier {
    /// 從使用者輸入建立：去除空白並轉成小寫，只接受 `[a-z0-9-]`
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let well_formed = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if normalized.is_empty() || !well_formed {
            return Err(GenError::InvalidIdentifier {
                value: raw.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub identifier: ServiceIdentifier,
    pub source_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub second_level: String,
    pub top_level: String,
}

/// 單一服務的輸出設定。各變體只攜帶自己需要的欄位，
/// `domain` 與 `tld`/`sld` 因此不可能同時出現。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceConfigRecord {
    FullDomain { name: String, domain: String },
    TldOnly { name: String, tld: String },
    SldTld { name: String, sld: String, tld: String },
    Aliased { name: String, alias: String },
}

impl ServiceConfigRecord {
    pub fn name(&self) -> &str {
        match self {
            Self::FullDomain { name, .. }
            | Self::TldOnly { name, .. }
            | Self::SldTld { name, .. }
            | Self::Aliased { name, .. } => name,
        }
    }

    pub fn tld(&self) -> Option<&str> {
        match self {
            Self::TldOnly { tld, .. } | Self::SldTld { tld, .. } => Some(tld),
            _ => None,
        }
    }

    pub fn sld(&self) -> Option<&str> {
        match self {
            Self::SldTld { sld, .. } => Some(sld),
            _ => None,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::FullDomain { domain, .. } => Some(domain),
            _ => None,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Aliased { alias, .. } => Some(alias),
            _ => None,
        }
    }

    pub(crate) fn with_name(self, display: String) -> Self {
        match self {
            Self::FullDomain { domain, .. } => Self::FullDomain {
                name: display,
                domain,
            },
            Self::TldOnly { tld, .. } => Self::TldOnly { name: display, tld },
            Self::SldTld { sld, tld, .. } => Self::SldTld {
                name: display,
                sld,
                tld,
            },
            Self::Aliased { alias, .. } => Self::Aliased {
                name: display,
                alias,
            },
        }
    }
}

/// 一次產生的結果：依選取順序排列的紀錄與序列化後的片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    pub records: Vec<ServiceConfigRecord>,
    pub fragment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_parse_normalizes_input() {
        let id = ServiceIdentifier::parse("  GitHub ").unwrap();
        assert_eq!(id.as_str(), "github");
    }

    #[test]
    fn test_identifier_parse_rejects_blank_and_inner_spaces() {
        assert!(ServiceIdentifier::parse("   ").is_err());
        assert!(ServiceIdentifier::parse("google drive").is_err());
    }

    #[test]
    fn test_identifier_parse_rejects_path_and_domain_characters() {
        for raw in ["../x", "a/b", "..", "x.ai", "foo_bar", "café"] {
            assert!(
                matches!(
                    ServiceIdentifier::parse(raw),
                    Err(GenError::InvalidIdentifier { .. })
                ),
                "{} should be rejected",
                raw
            );
        }
        assert_eq!(
            ServiceIdentifier::parse("Google-Drive2").unwrap().as_str(),
            "google-drive2"
        );
    }

    #[test]
    fn test_record_accessors_follow_variant() {
        let record = ServiceConfigRecord::SldTld {
            name: "xai".to_string(),
            sld: "x".to_string(),
            tld: "ai".to_string(),
        };
        assert_eq!(record.name(), "xai");
        assert_eq!(record.sld(), Some("x"));
        assert_eq!(record.tld(), Some("ai"));
        assert_eq!(record.domain(), None);
        assert_eq!(record.alias(), None);

        let renamed = record.with_name("xAI".to_string());
        assert_eq!(renamed.name(), "xAI");
        assert_eq!(renamed.sld(), Some("x"));
    }
}
