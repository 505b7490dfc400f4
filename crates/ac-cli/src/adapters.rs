//! Text file adapters.
//!
//! The engine only sees unit sequences; these adapters decide what a unit is.
//! In `letters` mode every line is one occurrence of a value indexed by its
//! characters. In `words` mode every line is `text,weight` and the text is
//! indexed by its words.

use std::fs;
use std::path::Path;

use ac_engine::{AutocompleteError, Autocompleter, Engine, EngineKind, WeightPolicy};
use clap::ValueEnum;
use tracing::debug;

/// Engine over sanitised text, one `String` per unit in either mode.
pub type TextEngine = Engine<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Letters,
    Words,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Words => "words",
        }
    }

    /// Splits already sanitised text into units.
    pub fn units(self, text: &str) -> Vec<String> {
        match self {
            Self::Letters => text.chars().map(String::from).collect(),
            Self::Words => text.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Units of a user-typed prefix, sanitised the same way as stored lines.
    pub fn query_path(self, prefix: &str) -> Vec<String> {
        self.units(&sanitize(prefix))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        source: AutocompleteError,
    },
}

/// One weighted occurrence read from a file (1-based `line`).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub line: usize,
    pub value: String,
    pub weight: f64,
    pub path: Vec<String>,
}

/// Lower-cases and keeps only alphanumerics and spaces, trimmed.
pub fn sanitize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .flat_map(char::to_lowercase)
        .collect();
    kept.trim().to_string()
}

pub fn parse_records(content: &str, mode: Mode) -> Result<Vec<Record>, LoadError> {
    let mut records = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let (value, weight) = match mode {
            Mode::Letters => (sanitize(raw), 1.0),
            Mode::Words => {
                if raw.trim().is_empty() {
                    continue;
                }
                let (text, weight) = raw.rsplit_once(',').ok_or_else(|| LoadError::Malformed {
                    line,
                    reason: "expected `text,weight`".to_string(),
                })?;
                let weight = weight.trim();
                let weight: f64 = weight.parse().map_err(|_| LoadError::Malformed {
                    line,
                    reason: format!("invalid weight {weight:?}"),
                })?;
                (sanitize(text), weight)
            }
        };
        // Lines with nothing left after sanitising carry no units.
        if value.is_empty() {
            continue;
        }
        let path = mode.units(&value);
        records.push(Record {
            line,
            value,
            weight,
            path,
        });
    }
    Ok(records)
}

pub fn read_records(file: &Path, mode: Mode) -> Result<Vec<Record>, LoadError> {
    let content = fs::read_to_string(file).map_err(|source| LoadError::Io {
        path: file.display().to_string(),
        source,
    })?;
    parse_records(&content, mode)
}

/// Inserts every record, stopping at the first one the engine rejects.
pub fn build_engine(
    records: &[Record],
    kind: EngineKind,
    policy: WeightPolicy,
) -> Result<TextEngine, LoadError> {
    let mut engine = Engine::new(kind, policy);
    for r in records {
        engine
            .insert(r.value.clone(), r.weight, &r.path)
            .map_err(|source| LoadError::Rejected {
                line: r.line,
                source,
            })?;
    }
    debug!(
        records = records.len(),
        values = engine.len(),
        engine = %kind,
        %policy,
        "engine built"
    );
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_punctuation_and_case() {
        assert_eq!(sanitize("  Hello, World!  "), "hello world");
        assert_eq!(sanitize("Ünïcode-Wörds"), "ünïcodewörds");
        assert_eq!(sanitize("?!"), "");
    }

    #[test]
    fn letters_count_occurrences() {
        let records = parse_records("Cat\ncat!\n\n---\ncar\n", Mode::Letters).unwrap();
        let values: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["cat", "cat", "car"]);
        assert_eq!(records[0].path, vec!["c", "a", "t"]);
        assert_eq!(records[2].line, 5);

        let engine = build_engine(&records, EngineKind::Simple, WeightPolicy::Sum).unwrap();
        assert_eq!(engine.len(), 2);
        let top = engine.autocomplete(&Mode::Letters.query_path("CA"), None).unwrap();
        assert_eq!(top, vec![("cat".to_string(), 2.0), ("car".to_string(), 1.0)]);
    }

    #[test]
    fn words_split_on_last_comma() {
        let records = parse_records("how are you, today,2.5\nhow old,1\n", Mode::Words).unwrap();
        assert_eq!(records[0].value, "how are you today");
        assert_eq!(records[0].weight, 2.5);
        assert_eq!(records[0].path, vec!["how", "are", "you", "today"]);

        let engine = build_engine(&records, EngineKind::Compressed, WeightPolicy::Sum).unwrap();
        let found = engine.autocomplete(&Mode::Words.query_path("How"), None).unwrap();
        assert_eq!(found.len(), 2);
        assert!(engine
            .autocomplete(&Mode::Words.query_path("how are"), None)
            .unwrap()
            .iter()
            .all(|(v, _)| v.starts_with("how are")));
    }

    #[test]
    fn malformed_word_lines() {
        let err = parse_records("no weight here\n", Mode::Words).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 1, .. }));
        let err = parse_records("ok,1\nbad,heavy\n", Mode::Words).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("heavy"));
    }

    #[test]
    fn non_positive_weight_is_rejected_with_line() {
        let records = parse_records("fine,1\nzero,0\n", Mode::Words).unwrap();
        let err = build_engine(&records, EngineKind::Simple, WeightPolicy::Sum).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Rejected {
                line: 2,
                source: AutocompleteError::NonPositiveWeight
            }
        ));
    }

    #[test]
    fn read_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "apple\nbanana\napple\n").unwrap();
        let records = read_records(&path, Mode::Letters).unwrap();
        assert_eq!(records.len(), 3);

        let missing = read_records(&dir.path().join("missing.txt"), Mode::Letters).unwrap_err();
        assert!(matches!(missing, LoadError::Io { .. }));
    }
}
