use std::path::Path;
use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use ac_engine::{Autocompleter, EngineKind, WeightPolicy};

use crate::adapters::{build_engine, read_records, LoadError, Mode, Record, TextEngine};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub mode: Mode,
    pub kind: EngineKind,
    pub policy: WeightPolicy,
    pub limit: usize,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub value: String,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct QueryReport<'a> {
    pub prefix: &'a str,
    pub mode: &'static str,
    pub engine: &'static str,
    pub policy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub values: usize,
    pub weight: f64,
    pub policy: &'static str,
    pub simple_nodes: usize,
    pub compressed_nodes: usize,
}

fn open(file: &str, opts: &QueryOptions) -> TextEngine {
    let records = die!(read_records(Path::new(file), opts.mode), "Error: {}");
    die!(
        build_engine(&records, opts.kind, opts.policy),
        "Error loading {file}: {}"
    )
}

pub fn run_query(
    engine: &TextEngine,
    prefix: &str,
    mode: Mode,
    limit: usize,
) -> ac_engine::Result<Vec<Hit>> {
    let path = mode.query_path(prefix);
    let found = engine.autocomplete(&path, Some(limit))?;
    Ok(found
        .into_iter()
        .map(|(value, weight)| Hit { value, weight })
        .collect())
}

/// One hit per line, weights aligned by display width.
pub fn render_hits(hits: &[Hit]) -> String {
    if hits.is_empty() {
        return "(no matches)\n".to_string();
    }
    let width = hits.iter().map(|h| h.value.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        let pad = width - hit.value.width();
        out.push_str(&format!(
            "#{:>2}: {}{}  {}\n",
            i + 1,
            hit.value,
            " ".repeat(pad),
            hit.weight
        ));
    }
    out
}

fn print_report(prefix: &str, opts: &QueryOptions, removed: Option<usize>, hits: Vec<Hit>) {
    if opts.json {
        let report = QueryReport {
            prefix,
            mode: opts.mode.as_str(),
            engine: opts.kind.as_str(),
            policy: opts.policy.as_str(),
            removed,
            hits,
        };
        let json = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{json}");
    } else {
        if let Some(n) = removed {
            println!("removed {n} value(s)");
        }
        print!("{}", render_hits(&hits));
    }
}

pub fn query(file: &str, prefix: &str, opts: &QueryOptions) {
    let engine = open(file, opts);
    let hits = die!(
        run_query(&engine, prefix, opts.mode, opts.limit),
        "Error: {}"
    );
    print_report(prefix, opts, None, hits);
}

pub fn remove(file: &str, prefix: &str, query: &str, opts: &QueryOptions) {
    let mut engine = open(file, opts);
    let removed = engine.remove(&opts.mode.query_path(prefix));
    let hits = die!(
        run_query(&engine, query, opts.mode, opts.limit),
        "Error: {}"
    );
    print_report(query, opts, Some(removed), hits);
}

pub fn dump(file: &str, opts: &QueryOptions) {
    let engine = open(file, opts);
    print!("{engine}");
}

pub fn collect_stats(records: &[Record], policy: WeightPolicy) -> Result<Stats, LoadError> {
    let simple = build_engine(records, EngineKind::Simple, policy)?;
    let compressed = build_engine(records, EngineKind::Compressed, policy)?;
    Ok(Stats {
        values: compressed.len(),
        weight: compressed.weight(),
        policy: policy.as_str(),
        simple_nodes: simple.node_count(),
        compressed_nodes: compressed.node_count(),
    })
}

pub fn stats(file: &str, mode: Mode, policy: WeightPolicy, json: bool) {
    let records = die!(read_records(Path::new(file), mode), "Error: {}");
    let s = die!(collect_stats(&records, policy), "Error loading {file}: {}");
    if json {
        let out = die!(serde_json::to_string_pretty(&s), "Error: {}");
        println!("{out}");
        return;
    }
    println!("{:<18}{}", "values:", s.values);
    println!("{:<18}{}", format!("weight ({}):", s.policy), s.weight);
    println!("{:<18}{}", "nodes simple:", s.simple_nodes);
    println!("{:<18}{}", "nodes compressed:", s.compressed_nodes);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::adapters::parse_records;

    fn engine(content: &str, kind: EngineKind) -> TextEngine {
        let records = parse_records(content, Mode::Letters).unwrap();
        build_engine(&records, kind, WeightPolicy::Sum).unwrap()
    }

    #[test]
    fn query_limits_and_orders() {
        let e = engine("cat\ncar\ncar\ncap\ncar\ncat\ndog\n", EngineKind::Compressed);
        let hits = run_query(&e, "ca", Mode::Letters, 2).unwrap();
        assert_eq!(
            hits,
            vec![
                Hit {
                    value: "car".into(),
                    weight: 3.0
                },
                Hit {
                    value: "cat".into(),
                    weight: 2.0
                },
            ]
        );
    }

    #[test]
    fn zero_limit_is_an_error() {
        let e = engine("cat\n", EngineKind::Simple);
        assert!(run_query(&e, "c", Mode::Letters, 0).is_err());
    }

    #[test]
    fn render_aligns_by_display_width() {
        let hits = vec![
            Hit {
                value: "日本".into(),
                weight: 2.0,
            },
            Hit {
                value: "abc".into(),
                weight: 1.5,
            },
        ];
        // "日本" is four columns wide, "abc" three.
        assert_eq!(render_hits(&hits), "# 1: 日本  2\n# 2: abc   1.5\n");
        assert_eq!(render_hits(&[]), "(no matches)\n");
    }

    #[test]
    fn report_json_omits_missing_removed() {
        let report = QueryReport {
            prefix: "ca",
            mode: "letters",
            engine: "simple",
            policy: "sum",
            removed: None,
            hits: vec![Hit {
                value: "cat".into(),
                weight: 1.0,
            }],
        };
        let v: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(v.get("removed").is_none());
        assert_eq!(v["hits"][0]["value"], "cat");
        assert_eq!(v["engine"], "simple");
    }

    #[test]
    fn stats_compare_layouts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "compress\ncompute\ncomputer\n").unwrap();
        let records = read_records(&path, Mode::Letters).unwrap();
        let s = collect_stats(&records, WeightPolicy::Sum).unwrap();
        assert_eq!(s.values, 3);
        assert_eq!(s.weight, 3.0);
        assert!(s.compressed_nodes < s.simple_nodes);
    }

    #[test]
    fn remove_then_query() {
        let mut e = engine("cat\ncar\ndog\n", EngineKind::Compressed);
        assert_eq!(e.remove(&Mode::Letters.query_path("car")), 1);
        let hits = run_query(&e, "", Mode::Letters, 10).unwrap();
        let values: Vec<&str> = hits.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(values.len(), 2);
        assert!(!values.contains(&"car"));
    }
}
