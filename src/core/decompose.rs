use crate::core::tables::RuleTables;
use crate::domain::model::DomainParts;
use crate::utils::error::{GenError, Result};

/// 使用內建複合後綴表拆解網域
pub fn decompose(registrable_domain: &str) -> Result<DomainParts> {
    decompose_with(&RuleTables::builtin(), registrable_domain)
}

/// 將 `example.co.uk` 拆成 `example` 與 `co.uk`。
/// 不處理 punycode，也不是完整的 public suffix 解析。
pub fn decompose_with(tables: &RuleTables, registrable_domain: &str) -> Result<DomainParts> {
    let labels: Vec<&str> = registrable_domain.split('.').collect();

    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(GenError::InvalidDomain {
            domain: registrable_domain.to_string(),
        });
    }

    let n = labels.len();
    let compound = format!("{}.{}", labels[n - 2], labels[n - 1]);

    if tables.is_compound_suffix(&compound) {
        let second_level = if n >= 3 { labels[n - 3] } else { labels[0] };
        return Ok(DomainParts {
            second_level: second_level.to_string(),
            top_level: compound,
        });
    }

    Ok(DomainParts {
        second_level: labels[n - 2].to_string(),
        top_level: labels[n - 1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(second_level: &str, top_level: &str) -> DomainParts {
        DomainParts {
            second_level: second_level.to_string(),
            top_level: top_level.to_string(),
        }
    }

    #[test]
    fn test_two_label_domain() {
        assert_eq!(decompose("github.com").unwrap(), parts("github", "com"));
        assert_eq!(decompose("x.ai").unwrap(), parts("x", "ai"));
    }

    #[test]
    fn test_compound_suffix() {
        assert_eq!(decompose("example.co.uk").unwrap(), parts("example", "co.uk"));
        assert_eq!(decompose("www.bbc.co.uk").unwrap(), parts("bbc", "co.uk"));
    }

    #[test]
    fn test_bare_compound_suffix_uses_first_label() {
        assert_eq!(decompose("co.uk").unwrap(), parts("co", "co.uk"));
    }

    #[test]
    fn test_subdomain_is_dropped() {
        assert_eq!(decompose("music.apple.com").unwrap(), parts("apple", "com"));
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(decompose("Example.CO.UK").unwrap(), parts("Example", "CO.UK"));
    }

    #[test]
    fn test_single_label_is_invalid() {
        let err = decompose("localhost").unwrap_err();
        assert!(matches!(err, GenError::InvalidDomain { ref domain } if domain == "localhost"));
    }

    #[test]
    fn test_empty_labels_are_invalid() {
        assert!(decompose("").is_err());
        assert!(decompose("github.").is_err());
        assert!(decompose(".com").is_err());
        assert!(decompose("a..com").is_err());
    }
}
