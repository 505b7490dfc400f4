//! Rejects a malformed `default_settings.toml` before it is embedded.

use toml::Value;

const SETTINGS: &str = "src/default_settings.toml";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS}");
    let table: Value = match include_str!("src/default_settings.toml").parse() {
        Ok(value) => value,
        Err(e) => panic!("{SETTINGS} is not valid TOML: {e}"),
    };
    if let Err(msg) = check_settings(&table) {
        panic!("{SETTINGS}: {msg}");
    }
}

fn check_settings(table: &Value) -> Result<(), String> {
    one_of(table, "engine", "kind", &["simple", "compressed"])?;
    one_of(table, "engine", "policy", &["sum", "average"])?;
    match table.get("query").and_then(|q| q.get("default_limit")) {
        Some(Value::Integer(n)) if *n > 0 => Ok(()),
        Some(other) => Err(format!("query.default_limit must be a positive integer, got {other}")),
        None => Err("missing query.default_limit".to_string()),
    }
}

fn one_of(table: &Value, section: &str, key: &str, allowed: &[&str]) -> Result<(), String> {
    match table.get(section).and_then(|s| s.get(key)) {
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => Ok(()),
        Some(other) => Err(format!("{section}.{key} must be one of {allowed:?}, got {other}")),
        None => Err(format!("missing {section}.{key}")),
    }
}
