use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::core::{CellValue, ExportError, ExportResult, FieldType};

/// Nombre y tipo declarado de un campo legible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        FieldSpec {
            name: name.to_string(),
            field_type,
        }
    }
}

/// Capacidad de reflexión que el motor necesita de un registro: enumerar
/// sus campos en orden de declaración y leerlos por nombre.
pub trait Record {
    /// Clave bajo la que se cachean los metadatos de campos. `None` omite
    /// la caché y los campos se recalculan en cada lectura.
    fn cache_key(&self) -> Option<&str> {
        None
    }

    /// Campos legibles en orden de declaración.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Valor de un campo por nombre.
    fn get(&self, name: &str) -> ExportResult<CellValue>;
}

/// Caché de metadatos de campos por tipo de registro. Las lecturas
/// concurrentes son seguras; una recomputación en carrera sobrescribe la
/// entrada con el mismo resultado.
#[derive(Debug, Default)]
pub struct FieldCache {
    inner: RwLock<HashMap<String, Arc<[FieldSpec]>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        FieldCache::default()
    }

    pub fn fields_for<R: Record + ?Sized>(&self, record: &R) -> Arc<[FieldSpec]> {
        let key = match record.cache_key() {
            Some(key) => key,
            None => return record.fields().into(),
        };

        {
            let cache = self.inner.read().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(key) {
                return Arc::clone(hit);
            }
        }

        let computed: Arc<[FieldSpec]> = record.fields().into();
        let mut cache = self.inner.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(key.to_string(), Arc::clone(&computed));
        computed
    }
}

/// Un objeto JSON es un registro: sus claves, en orden de inserción, son
/// los campos. No se cachea porque la forma puede variar entre objetos.
impl Record for Value {
    fn fields(&self) -> Vec<FieldSpec> {
        match self.as_object() {
            Some(map) => map
                .iter()
                .map(|(name, value)| FieldSpec::new(name, json_field_type(value)))
                .collect(),
            None => Vec::new(),
        }
    }

    fn get(&self, name: &str) -> ExportResult<CellValue> {
        let value = self
            .as_object()
            .and_then(|map| map.get(name))
            .ok_or_else(|| ExportError::InvalidField(name.to_string()))?;
        Ok(json_cell_value(value))
    }
}

fn json_field_type(value: &Value) -> FieldType {
    match value {
        Value::String(_) => FieldType::Text,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => FieldType::Integer,
        Value::Number(_) => FieldType::Decimal,
        _ => FieldType::Other,
    }
}

fn json_cell_value(value: &Value) -> CellValue {
    match value {
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Bool(b) => CellValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => CellValue::Decimal(n.as_f64().unwrap_or_default()),
        },
        Value::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

/// Registro construido a mano para llamadores con datos nativos tipados
/// (fechas incluidas). Los campos conservan el orden de inserción.
#[derive(Debug, Clone)]
pub struct TypedRecord {
    type_name: String,
    fields: Vec<(String, CellValue)>,
}

impl TypedRecord {
    pub fn new(type_name: &str) -> Self {
        TypedRecord {
            type_name: type_name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: CellValue) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }
}

impl Record for TypedRecord {
    fn cache_key(&self) -> Option<&str> {
        Some(&self.type_name)
    }

    fn fields(&self) -> Vec<FieldSpec> {
        self.fields
            .iter()
            .map(|(name, value)| FieldSpec::new(name, value.field_type()))
            .collect()
    }

    fn get(&self, name: &str) -> ExportResult<CellValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| ExportError::InvalidField(name.to_string()))
    }
}
