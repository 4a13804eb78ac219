use crate::merge::deep_merge_in_place;
use crate::DeepMergeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A parsed document: always a mapping at the top level.
pub type Document = Map<String, Value>;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse document text.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not valid in the given format
/// - The top-level JSON value is not an object
pub fn parse_document(text: &str, format: Format, origin: &str) -> Result<Document, DeepMergeError> {
    match format {
        Format::Json => {
            let value: Value = serde_json::from_str(text)
                .map_err(|source| DeepMergeError::Json { origin: origin.to_string(), source })?;
            match value {
                Value::Object(map) => Ok(map),
                _ => Err(DeepMergeError::NotAMapping { origin: origin.to_string() }),
            }
        },
        Format::Toml => {
            let table: toml::Table = toml::from_str(text)
                .map_err(|source| DeepMergeError::TomlParse { origin: origin.to_string(), source })?;
            toml_table_to_json(table, origin, "")
        },
    }
}

/// Read and parse a document from a file, or from stdin when `path` is `-`.
///
/// Without an explicit `format` the file extension decides, falling back to
/// JSON.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub fn read_document(path: &Path, format: Option<Format>) -> Result<Document, DeepMergeError> {
    let format = format.or_else(|| Format::from_path(path)).unwrap_or(Format::Json);

    let (origin, text) = if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| DeepMergeError::Io { origin: "<stdin>".to_string(), source })?;
        ("<stdin>".to_string(), text)
    } else {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| DeepMergeError::Io { origin: origin.clone(), source })?;
        (origin, text)
    };

    debug!("Read {} as {:?} ({} bytes)", origin, format, text.len());
    parse_document(&text, format, &origin)
}

/// Fold documents left to right: each one is deep-merged over the result of
/// the ones before it.
pub fn merge_documents<I>(documents: I) -> Document
where
    I: IntoIterator<Item = Document>,
{
    let mut documents = documents.into_iter();
    let Some(mut merged) = documents.next() else {
        return Document::new();
    };

    for (index, specialized) in documents.enumerate() {
        debug!("Merging document #{} ({} top-level keys)", index + 1, specialized.len());
        deep_merge_in_place(&mut merged, &specialized);
    }

    merged
}

/// Render a document; output always ends with a newline.
///
/// # Errors
///
/// Returns an error if the document cannot be represented in `format`
/// (TOML has no `null`, for instance).
pub fn render_document(
    document: &Document,
    format: Format,
    compact: bool,
) -> Result<String, DeepMergeError> {
    let mut rendered = match format {
        Format::Json if compact => serde_json::to_string(document)?,
        Format::Json => serde_json::to_string_pretty(document)?,
        Format::Toml => toml::to_string_pretty(document)?,
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

fn toml_table_to_json(table: toml::Table, origin: &str, prefix: &str) -> Result<Document, DeepMergeError> {
    table
        .into_iter()
        .map(|(key, value)| {
            let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
            toml_to_json(value, origin, &path).map(|value| (key, value))
        })
        .collect()
}

/// TOML datetimes have no JSON counterpart and become RFC 3339 strings.
/// `nan` and `inf` are rejected rather than turned into `null`.
fn toml_to_json(value: toml::Value, origin: &str, path: &str) -> Result<Value, DeepMergeError> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).ok_or_else(|| {
            DeepMergeError::NonFiniteFloat { origin: origin.to_string(), key: path.to_string(), value: f }
        })?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| toml_to_json(item, origin, &format!("{path}[{index}]")))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(toml_table_to_json(table, origin, path)?),
    })
}
