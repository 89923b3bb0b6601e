// src/store/action.rs
// =============================================================================
// The table of store actions and the requests they turn into.
//
// Each action is described once: which object it targets (database,
// table, or a single row), the URL suffix after "/-/", whether it sends a
// payload file, and whether it can return the affected rows. Everything
// else (CLI handling, sending) is shared.
//
// URL shapes:
//   <base>/<db>/-/create
//   <base>/<db>/<table>/-/<action>
//   <base>/<db>/<table>/<pks>/-/<action>
// =============================================================================

use super::payload::Payload;
use crate::error::{RbError, Result};
use serde_json::{json, Value};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    CreateTable,
    InsertRows,
    UpsertRows,
    UpdateRow,
    DeleteRow,
    DropTable,
}

/// What part of the database an action addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Database,
    Table,
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub target: Target,
    pub suffix: &'static str,
    pub takes_payload: bool,
    pub can_return: bool,
}

impl StoreAction {
    pub fn spec(self) -> ActionSpec {
        let (name, target, suffix, takes_payload, can_return) = match self {
            StoreAction::CreateTable => ("create-table", Target::Database, "create", true, false),
            StoreAction::InsertRows => ("insert-rows", Target::Table, "insert", true, true),
            StoreAction::UpsertRows => ("upsert-rows", Target::Table, "upsert", true, true),
            StoreAction::UpdateRow => ("update-row", Target::Row, "update", true, true),
            StoreAction::DeleteRow => ("delete-row", Target::Row, "delete", false, false),
            StoreAction::DropTable => ("drop-table", Target::Table, "drop", false, false),
        };
        ActionSpec {
            name,
            target,
            suffix,
            takes_payload,
            can_return,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Everything needed to build one request
#[derive(Debug, Clone, Default)]
pub struct StoreInput {
    pub database: String,
    pub table: Option<String>,
    pub pks: Vec<String>,
    pub payload: Option<Payload>,
    pub return_rows: bool,
    pub confirm: bool,
}

/// A fully validated request, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRequest {
    action: StoreAction,
    segments: Vec<String>,
    body: Option<Value>,
}

impl StoreRequest {
    // Builds the request for an action
    //
    // Checks that the input has what the action's target needs, loads the
    // payload into the body and injects "return": true when asked.
    pub fn build(action: StoreAction, input: StoreInput) -> Result<Self> {
        let spec = action.spec();
        let StoreInput {
            database,
            table,
            pks,
            payload,
            return_rows,
            confirm,
        } = input;

        let mut segments = vec![tilde_encode(&database)];
        if spec.target != Target::Database {
            let table = table.ok_or_else(|| {
                RbError::InvalidConfig(format!("{} requires a table", spec.name))
            })?;
            segments.push(tilde_encode(&table));
        }
        if spec.target == Target::Row {
            if pks.is_empty() {
                return Err(RbError::InvalidConfig(format!(
                    "{} requires primary key values",
                    spec.name
                )));
            }
            let encoded: Vec<String> = pks.iter().map(|pk| tilde_encode(pk)).collect();
            segments.push(encoded.join(","));
        }
        segments.push("-".to_string());
        segments.push(spec.suffix.to_string());

        if return_rows && !spec.can_return {
            return Err(RbError::InvalidConfig(format!(
                "{} cannot return rows",
                spec.name
            )));
        }

        let body = match (action, payload) {
            (StoreAction::DropTable, _) if confirm => Some(json!({ "confirm": true })),
            (StoreAction::DropTable, _) => Some(json!({})),
            (_, Some(mut payload)) if spec.takes_payload => {
                if return_rows {
                    payload.request_returned_rows()?;
                }
                Some(payload.into_value())
            }
            (_, None) if spec.takes_payload => {
                return Err(RbError::InvalidConfig(format!(
                    "{} requires a payload file",
                    spec.name
                )));
            }
            _ => None,
        };

        Ok(Self {
            action,
            segments,
            body,
        })
    }

    pub fn action(&self) -> StoreAction {
        self.action
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Appends this request's path to `base`
    pub fn endpoint(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RbError::InvalidConfig(format!("base URL cannot have a path: {}", base)))?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }
        Ok(url)
    }
}

// Encodes a path segment the way Datasette expects
//
// Letters, digits, '_' and '-' pass through, a space becomes '+', and
// every other byte becomes "~XX" (uppercase hex).
//
// Example:
//   "dogs/cats.json" -> "dogs~2Fcats~2Ejson"
pub fn tilde_encode(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => encoded.push(byte as char),
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("~{:02X}", byte)),
        }
    }
    encoded
}
