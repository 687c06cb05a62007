use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gsclog_core::{Batch, Location, MessageRecord};
use gsclog_logging::gsclog_info;
use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot read batch {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed XML batch: {0}")]
    Xml(String),
    #[error("malformed JSON batch: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported batch format {0:?} (expected .xml or .json)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
struct XmlBatch {
    #[serde(rename = "message", default)]
    messages: Vec<XmlMessage>,
}

#[derive(Debug, Deserialize)]
struct XmlMessage {
    #[serde(rename = "@type", default)]
    kind: String,
    #[serde(rename = "@module", default)]
    module: String,
    #[serde(rename = "@target", default)]
    target: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "location", default)]
    locations: Vec<XmlLocation>,
}

#[derive(Debug, Deserialize)]
struct XmlLocation {
    #[serde(rename = "@line")]
    line: u32,
    #[serde(rename = "@column", default)]
    column: u32,
}

impl From<XmlMessage> for MessageRecord {
    fn from(message: XmlMessage) -> Self {
        let locations = message
            .locations
            .into_iter()
            .map(|l| Location {
                line: l.line,
                column: l.column,
            })
            .collect();
        MessageRecord::new(
            message.kind.as_str(),
            message.text,
            message.module,
            locations,
            message.target,
        )
    }
}

/// Loads a whole batch; the reader is chosen by file extension.
pub fn load_batch(path: &Path) -> Result<Batch, BatchError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let parse: fn(&str) -> Result<Batch, BatchError> = match extension.as_str() {
        "xml" => parse_xml_batch,
        "json" => parse_json_batch,
        _ => return Err(BatchError::UnsupportedFormat(extension)),
    };

    let content = fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let batch = parse(&content)?;
    gsclog_info!("Loaded {} messages from {:?}", batch.len(), path);
    Ok(batch)
}

/// `<messages><message type=".." module=".." target=".."><text/><location line=".." column=".."/></message></messages>`
pub fn parse_xml_batch(content: &str) -> Result<Batch, BatchError> {
    let root: XmlBatch = from_str(content).map_err(|err| BatchError::Xml(err.to_string()))?;
    Ok(root.messages.into_iter().map(MessageRecord::from).collect())
}

/// A JSON array of message records.
fn parse_json_batch(content: &str) -> Result<Batch, BatchError> {
    let records: Vec<MessageRecord> = serde_json::from_str(content)?;
    Ok(Batch::new(records))
}
