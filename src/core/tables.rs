use std::collections::HashMap;

/// 識別碼與網域不相像的服務
pub const SPECIAL_CASES: &[(&str, &str)] = &[
    ("rednote", "xiaohongshu.com"),
    ("xai", "x.ai"),
    ("bbc", "bbc.co.uk"),
    ("line", "line.me"),
    ("notion", "notion.so"),
    ("telegram", "telegram.org"),
    ("wikipedia", "wikipedia.org"),
    ("github-copilot", "githubcopilot.com"),
    ("bilibili", "bilibili.tv"),
    ("douyin", "douyin.com"),
    ("tiktok", "tiktok.com"),
];

/// 同一品牌的多個子產品，交給下游以品牌名稱處理
pub const ALIASES: &[(&str, &str)] = &[
    ("google-drive", "google"),
    ("google-maps", "google"),
    ("google-play", "google"),
    ("google-scholar", "google"),
    ("youtube-music", "youtube"),
];

pub const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("xai", "xAI"),
    ("openai", "OpenAI"),
    ("github-copilot", "GitHub Copilot"),
    ("youtube-music", "YouTube Music"),
    ("google-drive", "Google Drive"),
    ("google-maps", "Google Maps"),
    ("google-play", "Google Play"),
    ("google-scholar", "Google Scholar"),
];

pub const COMPOUND_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "com.au", "net.au", "org.au", "co.jp",
    "ne.jp", "or.jp", "com.cn", "net.cn", "org.cn", "com.tw", "com.hk", "com.br", "co.nz",
    "co.kr", "co.in", "com.sg",
];

/// 推論規則的資料表，預設使用內建表格，測試可自行替換
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    special_cases: HashMap<String, String>,
    aliases: HashMap<String, String>,
    display_names: HashMap<String, String>,
    compound_suffixes: Vec<String>,
}

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl RuleTables {
    pub fn builtin() -> Self {
        Self {
            special_cases: to_map(SPECIAL_CASES),
            aliases: to_map(ALIASES),
            display_names: to_map(DISPLAY_NAMES),
            compound_suffixes: COMPOUND_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_special_case(mut self, identifier: &str, domain: &str) -> Self {
        self.special_cases
            .insert(identifier.to_string(), domain.to_string());
        self
    }

    pub fn with_alias(mut self, identifier: &str, alias: &str) -> Self {
        self.aliases.insert(identifier.to_string(), alias.to_string());
        self
    }

    pub fn with_display_name(mut self, identifier: &str, display: &str) -> Self {
        self.display_names
            .insert(identifier.to_string(), display.to_string());
        self
    }

    pub fn with_compound_suffix(mut self, suffix: &str) -> Self {
        self.compound_suffixes.push(suffix.to_ascii_lowercase());
        self
    }

    pub fn special_case(&self, identifier: &str) -> Option<&str> {
        self.special_cases.get(identifier).map(String::as_str)
    }

    pub fn alias(&self, identifier: &str) -> Option<&str> {
        self.aliases.get(identifier).map(String::as_str)
    }

    pub fn display_name(&self, identifier: &str) -> Option<&str> {
        self.display_names.get(identifier).map(String::as_str)
    }

    pub fn is_compound_suffix(&self, suffix: &str) -> bool {
        self.compound_suffixes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(suffix))
    }
}
