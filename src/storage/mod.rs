//! Persistence layer.
//!
//! Saves and loads the form (debts + settings) to/from a JSON document
//! at a user-chosen path. Balance and rate are stored as the raw text the
//! user typed; amounts are JSON numbers; dates are `YYYY-MM-DD`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DebtSimError, Result};
use crate::form::DebtDraft;
use crate::types::Debt;

/// Default document path when the caller names none.
pub const DEFAULT_DOCUMENT_FILE: &str = "debts.json";

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

/// Form settings as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "text_field")]
    pub initial_balance: String,
    #[serde(default, deserialize_with = "text_field")]
    pub annual_interest_rate: String,
    #[serde(default, deserialize_with = "text_field")]
    pub start_date: String,
    #[serde(default)]
    pub pay_immediately: bool,
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub debts: Vec<Debt>,
    pub settings: Settings,
}

/// Debt row as read from disk, before its fields are validated.
#[derive(Debug, Deserialize)]
struct StoredDebt {
    #[serde(default, deserialize_with = "text_field")]
    name: String,
    #[serde(default, deserialize_with = "text_field")]
    amount: String,
    #[serde(default, deserialize_with = "text_field")]
    due_date: String,
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    debts: Vec<StoredDebt>,
    #[serde(default)]
    settings: Settings,
}

/// Text fields written by hand sometimes hold bare numbers; keep their text.
fn text_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// ---------------------------------------------------------------------------
// File operations
// ---------------------------------------------------------------------------

/// Write the document as pretty JSON with four-space indentation.
pub fn save_document(document: &Document, path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_DOCUMENT_FILE);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;

    std::fs::write(path, &buf)?;

    info!(path, debts = document.debts.len(), "Debts and settings saved");
    Ok(())
}

/// Load a document.
///
/// A missing file or invalid JSON is a [`DebtSimError::MalformedPersistedState`].
/// Debt rows go through the same checks as typed input, so a bad amount,
/// a negative amount or an impossible due date is an `InvalidInput`.
/// Other read failures surface as I/O errors.
pub fn load_document(path: Option<&str>) -> Result<Document> {
    let path = path.unwrap_or(DEFAULT_DOCUMENT_FILE);

    if !Path::new(path).exists() {
        warn!(path, "Document not found");
        return Err(DebtSimError::malformed(path, "The file does not exist."));
    }

    let json = std::fs::read_to_string(path)?;

    let stored: StoredDocument = serde_json::from_str(&json).map_err(|e| {
        warn!(path, error = %e, "Document is not valid JSON");
        DebtSimError::malformed(path, format!("The file is not a valid JSON file ({e})."))
    })?;

    let debts = stored
        .debts
        .into_iter()
        .enumerate()
        .map(|(row, stored)| {
            let draft = DebtDraft {
                name: stored.name,
                amount: stored.amount,
                due_date: stored.due_date,
            };
            draft.parse().map_err(|e| {
                warn!(path, row, error = %e, "Stored debt rejected");
                e
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let document = Document {
        debts,
        settings: stored.settings,
    };

    info!(path, debts = document.debts.len(), "Debts and settings loaded");
    Ok(document)
}

/// Delete the document (for testing or reset).
pub fn delete_document(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_DOCUMENT_FILE);
    if Path::new(path).exists() {
        std::fs::remove_file(path)?;
        debug!(path, "Document deleted");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
