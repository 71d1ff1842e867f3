use crate::domain::model::ServiceConfigRecord;

pub const DEFAULT_INDENT: &str = "  ";
pub const RECORD_SEPARATOR: &str = ",\n";

// JSON 字串跳脫，控制字元不會原樣輸出
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// 輸出單行物件字面值，鍵的順序固定為 name、tld、sld、domain、alias
pub fn serialize(record: &ServiceConfigRecord) -> String {
    let fields = [
        ("name", Some(record.name())),
        ("tld", record.tld()),
        ("sld", record.sld()),
        ("domain", record.domain()),
        ("alias", record.alias()),
    ];

    let pairs: Vec<String> = fields
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}: {}", key, quote(v))))
        .collect();

    format!("{{ {} }}", pairs.join(", "))
}

pub fn serialize_all(records: &[ServiceConfigRecord]) -> String {
    serialize_all_with_indent(records, DEFAULT_INDENT)
}

pub fn serialize_all_with_indent(records: &[ServiceConfigRecord], indent: &str) -> String {
    records
        .iter()
        .map(|record| format!("{}{}", indent, serialize(record)))
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}
