use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Valor tipado de un campo, resuelto una sola vez por celda.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Null,
}

impl CellValue {
    /// Tipo declarado que corresponde al valor.
    pub fn field_type(&self) -> FieldType {
        match self {
            CellValue::Text(_) => FieldType::Text,
            CellValue::Integer(_) => FieldType::Integer,
            CellValue::Decimal(_) => FieldType::Decimal,
            CellValue::Boolean(_) => FieldType::Boolean,
            CellValue::DateTime(_) => FieldType::DateTime,
            CellValue::Null => FieldType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Decimal,
    Boolean,
    DateTime,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Number,
    Text,
}

/// Celda ya clasificada: representación literal más índice de estilo.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub literal: String,
    pub style_index: u32,
}

/// Columna a exportar: clave del campo y etiqueta visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
}

impl ColumnSpec {
    pub fn new(key: &str, label: &str) -> Self {
        ColumnSpec {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWidth {
    pub width: f64,
    pub best_fit: bool,
    pub custom_width: bool,
}

/// Región combinada de la fila de título, por ejemplo "A1:F1".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRegion {
    pub first_col: u16,
    pub last_col: u16,
    pub reference: String,
}
