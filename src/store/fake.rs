// src/store/fake.rs
// =============================================================================
// An in-process stand-in for Datasette's JSON write API, used by tests.
//
// It speaks just enough of the protocol for our client:
// - POST /<db>/-/create
// - POST /<db>/<table>/-/insert | upsert | drop
// - POST /<db>/<table>/<pk>/-/update | delete
// - GET  /<db>/<table>.json   (rows keyed by primary key, like ?_shape=object)
//
// Every request, accepted or not, bumps a counter so tests can assert that
// nothing reached the network.
// =============================================================================

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const TOKEN: &str = "test-token";

type Row = Map<String, Value>;

struct Table {
    pk: String,
    rows: Vec<Row>,
}

#[derive(Default)]
struct FakeState {
    requests: AtomicUsize,
    tables: Mutex<HashMap<(String, String), Table>>,
}

pub struct FakeStore {
    pub base_url: String,
    state: Arc<FakeState>,
    server: JoinHandle<()>,
}

impl FakeStore {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            server,
        }
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Creates an empty table without going through HTTP
    pub fn add_table(&self, db: &str, table: &str, pk: &str) {
        self.state.tables.lock().unwrap().insert(
            (db.to_string(), table.to_string()),
            Table {
                pk: pk.to_string(),
                rows: Vec::new(),
            },
        );
    }

    pub fn has_table(&self, db: &str, table: &str) -> bool {
        self.state
            .tables
            .lock()
            .unwrap()
            .contains_key(&(db.to_string(), table.to_string()))
    }
}

impl Drop for FakeStore {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn ok(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn errors(status: StatusCode, messages: &[String]) -> Response {
    ok(status, json!({ "ok": false, "errors": messages }))
}

fn not_found(table: &str) -> Response {
    ok(
        StatusCode::NOT_FOUND,
        json!({ "ok": false, "error": format!("Table not found: {}", table), "status": 404 }),
    )
}

fn tilde_decode(segment: &str) -> String {
    let mut bytes = Vec::with_capacity(segment.len());
    let raw = segment.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'~' if i + 2 < raw.len() => {
                let hex = std::str::from_utf8(&raw[i + 1..i + 3]).unwrap();
                bytes.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(bytes).unwrap()
}

fn key_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let segments: Vec<String> = uri
        .path()
        .trim_matches('/')
        .split('/')
        .map(tilde_decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    if method == Method::GET {
        return read_table(&state, &segments);
    }

    let expected = format!("Bearer {}", TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return errors(StatusCode::FORBIDDEN, &["Permission denied".to_string()]);
    }

    let payload: Value = if body.is_empty() {
        json!({})
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(_) => return errors(StatusCode::BAD_REQUEST, &["Invalid JSON".to_string()]),
        }
    };

    let mut tables = state.tables.lock().unwrap();
    match segments.as_slice() {
        [db, "-", "create"] => create_table(&mut tables, db, &payload),
        [db, table, "-", action @ ("insert" | "upsert")] => {
            insert_rows(&mut tables, db, table, &payload, *action == "upsert")
        }
        [db, table, "-", "drop"] => drop_table(&mut tables, db, table, &payload),
        [db, table, pk, "-", "update"] => update_row(&mut tables, db, table, pk, &payload),
        [db, table, pk, "-", "delete"] => delete_row(&mut tables, db, table, pk),
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn read_table(state: &FakeState, segments: &[&str]) -> Response {
    let [db, file] = segments else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let Some(table) = file.strip_suffix(".json") else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };

    let tables = state.tables.lock().unwrap();
    let Some(found) = tables.get(&(db.to_string(), table.to_string())) else {
        return not_found(table);
    };

    let keyed: Map<String, Value> = found
        .rows
        .iter()
        .map(|row| (key_of(row.get(&found.pk)), Value::Object(row.clone())))
        .collect();
    ok(StatusCode::OK, Value::Object(keyed))
}

type Tables = HashMap<(String, String), Table>;

fn create_table(tables: &mut Tables, db: &str, payload: &Value) -> Response {
    let Some(name) = payload.get("table").and_then(Value::as_str) else {
        return errors(StatusCode::BAD_REQUEST, &["Table is required".to_string()]);
    };
    let key = (db.to_string(), name.to_string());
    if tables.contains_key(&key) {
        return errors(
            StatusCode::BAD_REQUEST,
            &[format!("Table already exists: {}", name)],
        );
    }

    let pk = payload
        .get("pk")
        .and_then(Value::as_str)
        .unwrap_or("rowid")
        .to_string();
    tables.insert(
        key,
        Table {
            pk,
            rows: Vec::new(),
        },
    );

    ok(
        StatusCode::CREATED,
        json!({ "ok": true, "database": db, "table": name }),
    )
}

fn insert_rows(tables: &mut Tables, db: &str, table: &str, payload: &Value, upsert: bool) -> Response {
    let Some(found) = tables.get_mut(&(db.to_string(), table.to_string())) else {
        return not_found(table);
    };
    let Some(rows) = payload.get("rows").and_then(Value::as_array) else {
        return errors(
            StatusCode::BAD_REQUEST,
            &["JSON must have one or other of \"row\" or \"rows\"".to_string()],
        );
    };

    let mut written = Vec::new();
    for row in rows {
        let Some(row) = row.as_object() else {
            return errors(StatusCode::BAD_REQUEST, &["Rows must be objects".to_string()]);
        };
        let key = key_of(row.get(&found.pk));
        let existing = found.rows.iter().position(|r| key_of(r.get(&found.pk)) == key);
        match (existing, upsert) {
            (Some(_), false) => {
                return errors(
                    StatusCode::BAD_REQUEST,
                    &[format!("UNIQUE constraint failed: {}.{}", table, found.pk)],
                );
            }
            (Some(index), true) => {
                for (column, value) in row {
                    found.rows[index].insert(column.clone(), value.clone());
                }
                written.push(Value::Object(found.rows[index].clone()));
            }
            (None, _) => {
                found.rows.push(row.clone());
                written.push(Value::Object(row.clone()));
            }
        }
    }

    let mut body = json!({ "ok": true });
    if payload.get("return") == Some(&Value::Bool(true)) {
        body["rows"] = Value::Array(written);
    }
    let status = if upsert { StatusCode::OK } else { StatusCode::CREATED };
    ok(status, body)
}

fn update_row(tables: &mut Tables, db: &str, table: &str, pk: &str, payload: &Value) -> Response {
    let Some(found) = tables.get_mut(&(db.to_string(), table.to_string())) else {
        return not_found(table);
    };
    let Some(update) = payload.get("update").and_then(Value::as_object) else {
        return errors(
            StatusCode::BAD_REQUEST,
            &["JSON must contain an update dictionary".to_string()],
        );
    };
    let pk_column = found.pk.clone();
    let Some(row) = found
        .rows
        .iter_mut()
        .find(|row| key_of(row.get(&pk_column)) == pk)
    else {
        return ok(
            StatusCode::NOT_FOUND,
            json!({ "ok": false, "error": "Record not found", "status": 404 }),
        );
    };

    for (column, value) in update {
        row.insert(column.clone(), value.clone());
    }

    let mut body = json!({ "ok": true });
    if payload.get("return") == Some(&Value::Bool(true)) {
        body["row"] = Value::Object(row.clone());
    }
    ok(StatusCode::OK, body)
}

fn delete_row(tables: &mut Tables, db: &str, table: &str, pk: &str) -> Response {
    let Some(found) = tables.get_mut(&(db.to_string(), table.to_string())) else {
        return not_found(table);
    };
    let pk_column = found.pk.clone();
    let before = found.rows.len();
    found.rows.retain(|row| key_of(row.get(&pk_column)) != pk);
    if found.rows.len() == before {
        return ok(
            StatusCode::NOT_FOUND,
            json!({ "ok": false, "error": "Record not found", "status": 404 }),
        );
    }
    ok(StatusCode::OK, json!({ "ok": true }))
}

fn drop_table(tables: &mut Tables, db: &str, table: &str, payload: &Value) -> Response {
    let key = (db.to_string(), table.to_string());
    let Some(found) = tables.get(&key) else {
        return not_found(table);
    };

    if payload.get("confirm") != Some(&Value::Bool(true)) {
        return ok(
            StatusCode::OK,
            json!({
                "ok": true,
                "database": db,
                "table": table,
                "row_count": found.rows.len(),
                "message": "Pass \"confirm\": true to confirm",
            }),
        );
    }

    tables.remove(&key);
    ok(StatusCode::OK, json!({ "ok": true }))
}
