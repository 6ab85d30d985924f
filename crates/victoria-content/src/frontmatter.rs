//! Front-matter extraction and parsing.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

/// A primitive front-matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl MetaValue {
    /// Convert a YAML scalar. Nulls, sequences and mappings have no primitive form.
    fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            _ => None,
        }
    }

    /// Whether the value counts as present when used for display.
    ///
    /// Empty strings, `false` and zero are treated as missing, the same way
    /// a templating fallback would treat them.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Bool(b) => *b,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Key/value metadata from the top of a content file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// Look up a value for display, skipping empty ones.
    pub fn display(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| v.is_truthy())
            .map(|v| v.to_string())
    }

    /// Page title, if one is set.
    pub fn title(&self) -> Option<String> {
        self.display("title")
    }

    /// Page description, if one is set.
    pub fn description(&self) -> Option<String> {
        self.display("description")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn from_yaml(value: Value) -> Result<Self, FrontMatterError> {
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(FrontMatterError::InvalidYaml(
                    "front-matter must be a mapping of keys to values".to_string(),
                ))
            }
        };

        let mut metadata = Self::default();
        for (key, value) in &mapping {
            let Some(key) = MetaValue::from_yaml(key) else {
                continue;
            };
            if let Some(value) = MetaValue::from_yaml(value) {
                metadata.insert(key.to_string(), value);
            }
        }

        Ok(metadata)
    }
}

/// Split a content file into its front-matter and markdown body.
///
/// Sources without a leading `---` have empty metadata and are returned whole.
pub fn split_front_matter(source: &str) -> Result<(Metadata, &str), FrontMatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((Metadata::default(), source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontMatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let after_close = &after_open[close_pos + 4..];

    // Skip whatever is left of the delimiter line, then blank lines.
    let body = match after_close.find('\n') {
        Some(newline) => &after_close[newline + 1..],
        None => "",
    };
    let body = body.trim_start_matches(['\n', '\r']);

    let value: Value = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;

    Ok((Metadata::from_yaml(value)?, body))
}

/// Errors that can occur when parsing front-matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("Unclosed front-matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front-matter: {0}")]
    InvalidYaml(String),
}
