//! Rows and column descriptors.

use std::sync::Arc;

use serde_json::Value;

/// One record in the table's backing collection.
pub type Row = serde_json::Map<String, Value>;

/// Renders one cell: `(value, row) -> display text`. Must not panic.
pub type CellRender = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// The canonical string form of a row id.
///
/// Callers may supply ids as numbers or strings interchangeably;
/// normalizing here means selection membership checks never miss on form.
pub fn canonical_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A row paired with the identity assigned to it when the collection was set.
#[derive(Debug, Clone)]
pub struct TableRecord {
    /// Canonical id: the row's `id` field, or its positional index at
    /// assignment time when no `id` field exists.
    pub id: String,
    pub fields: Row,
}

/// Assign canonical ids to a freshly supplied row collection.
pub fn record_ids(rows: Vec<Row>) -> Vec<TableRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(index, fields)| {
            let id = fields
                .get("id")
                .filter(|v| !v.is_null())
                .map(canonical_id)
                .unwrap_or_else(|| index.to_string());
            TableRecord { id, fields }
        })
        .collect()
}

/// A table column definition.
#[derive(Clone)]
pub struct Column {
    /// Field this column reads from each row.
    pub key: String,
    /// Header text displayed at the top.
    pub label: String,
    /// Optional width hint, passed through to the rendered header cell.
    pub width: Option<String>,
    /// Optional cell formatter.
    pub render: Option<CellRender>,
}

impl Column {
    /// Create a new column with the given key and label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            render: None,
        }
    }

    /// Set a width hint for this column.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set a cell formatter for this column.
    pub fn render(mut self, f: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}
