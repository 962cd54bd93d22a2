//! Explicit entity schema descriptors.
//!
//! An [`EntityDef`] is constructed once, up front, and passed by reference
//! into the translation layer. It defines the bijection between entity field
//! names (application side) and storage column names (connector side), the
//! storage type of each field, and which fields participate in the primary
//! key. There is no runtime type introspection: what the descriptor says is
//! all the translation layer ever knows about an entity.

pub mod registry;

#[doc(inline)]
pub use registry::Registrar;

use chrono::{DateTime, Utc};
use sea_query::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Schema definition errors, raised while constructing descriptors.
#[derive(Debug)]
pub enum SchemaError {
    /// Two fields share the same field name.
    DuplicateField(String),
    /// Two fields share the same column name.
    DuplicateColumn(String),
    /// The entity declares no partition key; point reads would be unkeyable.
    NoPartitionKey(String),
    /// Scope or name prefix is empty.
    EmptyScope,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateField(name) => {
                write!(f, "duplicate field name in entity definition: {}", name)
            }
            SchemaError::DuplicateColumn(name) => {
                write!(f, "duplicate column name in entity definition: {}", name)
            }
            SchemaError::NoPartitionKey(entity) => {
                write!(f, "entity {} has no partition key", entity)
            }
            SchemaError::EmptyScope => {
                write!(f, "scope and name prefix must be non-empty")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Bool,
    Int32,
    Int64,
    Double,
    Text,
    Blob,
    Timestamp,
    Uuid,
    Json,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Bool => "bool",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Double => "double",
            ColumnType::Text => "text",
            ColumnType::Blob => "blob",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Uuid => "uuid",
            ColumnType::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl ColumnType {
    /// Convert a raw textual value into the matching [`Value`] variant.
    ///
    /// Used when predicates arrive as text (shell-style `Field:op:value`
    /// expressions). Timestamps are RFC 3339; blobs are hex encoded.
    ///
    /// # Errors
    ///
    /// Returns an error message naming the offending token when the raw
    /// string does not parse as this type.
    pub fn parse_value(&self, raw: &str) -> Result<Value, String> {
        match self {
            ColumnType::Bool => raw
                .parse::<bool>()
                .map(|b| Value::Bool(Some(b)))
                .map_err(|_| format!("invalid bool value: {}", raw)),
            ColumnType::Int32 => raw
                .parse::<i32>()
                .map(|i| Value::Int(Some(i)))
                .map_err(|_| format!("invalid int32 value: {}", raw)),
            ColumnType::Int64 => raw
                .parse::<i64>()
                .map(|i| Value::BigInt(Some(i)))
                .map_err(|_| format!("invalid int64 value: {}", raw)),
            ColumnType::Double => raw
                .parse::<f64>()
                .map(|d| Value::Double(Some(d)))
                .map_err(|_| format!("invalid double value: {}", raw)),
            ColumnType::Text => Ok(Value::String(Some(raw.to_string()))),
            ColumnType::Blob => decode_hex(raw)
                .map(|b| Value::Bytes(Some(b)))
                .ok_or_else(|| format!("invalid hex blob value: {}", raw)),
            ColumnType::Timestamp => DateTime::parse_from_rfc3339(raw)
                .map(|t| Value::from(t.with_timezone(&Utc)))
                .map_err(|_| format!("invalid RFC 3339 timestamp value: {}", raw)),
            ColumnType::Uuid => Uuid::parse_str(raw)
                .map(Value::from)
                .map_err(|_| format!("invalid uuid value: {}", raw)),
            ColumnType::Json => serde_json::from_str::<serde_json::Value>(raw)
                .map(|j| Value::Json(Some(Box::new(j))))
                .map_err(|_| format!("invalid json value: {}", raw)),
        }
    }
}

fn decode_hex(raw: &str) -> Option<Vec<u8>> {
    if !raw.is_ascii() || raw.len() % 2 != 0 {
        return None;
    }
    (0..raw.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&raw[i..i + 2], 16).ok())
        .collect()
}

/// Role a field plays in the entity's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Part of the partition key.
    PartitionKey,
    /// Part of the clustering key.
    ClusteringKey,
    /// Regular, non-key field.
    None,
}

/// One field of an entity: application-side name, storage-side column name,
/// storage type, and key role.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub field: String,
    pub column: String,
    pub ty: ColumnType,
    pub key: KeyRole,
}

impl FieldDef {
    /// Convenience constructor for a regular field.
    pub fn new(field: &str, column: &str, ty: ColumnType) -> Self {
        FieldDef {
            field: field.to_string(),
            column: column.to_string(),
            ty,
            key: KeyRole::None,
        }
    }

    /// Mark this field as part of the partition key.
    pub fn partition_key(mut self) -> Self {
        self.key = KeyRole::PartitionKey;
        self
    }

    /// Mark this field as part of the clustering key.
    pub fn clustering_key(mut self) -> Self {
        self.key = KeyRole::ClusteringKey;
        self
    }
}

/// Resolved schema descriptor for one entity.
///
/// Lookup maps are built once at construction; all accessors are read-only,
/// so a shared reference can safely serve concurrent `read`/`range` calls.
#[derive(Debug)]
pub struct EntityDef {
    name: String,
    fields: Vec<FieldDef>,
    field_to_col: HashMap<String, String>,
    col_to_field: HashMap<String, String>,
    types: HashMap<String, ColumnType>,
}

impl EntityDef {
    /// Build a descriptor, validating that field and column names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] or
    /// [`SchemaError::DuplicateColumn`] on a name collision.
    pub fn new(name: &str, fields: Vec<FieldDef>) -> Result<Self, SchemaError> {
        let mut field_to_col = HashMap::with_capacity(fields.len());
        let mut col_to_field = HashMap::with_capacity(fields.len());
        let mut types = HashMap::with_capacity(fields.len());
        for fd in &fields {
            if field_to_col
                .insert(fd.field.clone(), fd.column.clone())
                .is_some()
            {
                return Err(SchemaError::DuplicateField(fd.field.clone()));
            }
            if col_to_field
                .insert(fd.column.clone(), fd.field.clone())
                .is_some()
            {
                return Err(SchemaError::DuplicateColumn(fd.column.clone()));
            }
            types.insert(fd.field.clone(), fd.ty);
        }
        Ok(EntityDef {
            name: name.to_string(),
            fields,
            field_to_col,
            col_to_field,
            types,
        })
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All field definitions, in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Storage column for a field name, if the field exists.
    pub fn column_for_field(&self, field: &str) -> Option<&str> {
        self.field_to_col.get(field).map(String::as_str)
    }

    /// Field name for a storage column, if the column exists.
    pub fn field_for_column(&self, column: &str) -> Option<&str> {
        self.col_to_field.get(column).map(String::as_str)
    }

    /// The full column-name to field-name mapping, as consumed by the
    /// result mapper.
    pub fn col_to_field(&self) -> &HashMap<String, String> {
        &self.col_to_field
    }

    /// Storage type of a field, if the field exists.
    pub fn field_type(&self, field: &str) -> Option<ColumnType> {
        self.types.get(field).copied()
    }

    /// Whether the entity declares at least one partition key field.
    pub fn has_partition_key(&self) -> bool {
        self.fields
            .iter()
            .any(|fd| fd.key == KeyRole::PartitionKey)
    }

    /// Translate an ordered list of field names into column names.
    ///
    /// Fails on the first unknown field, naming it, so callers can diagnose
    /// schema drift. Order is preserved.
    pub fn columns_for_fields(&self, fields: &[&str]) -> Result<Vec<String>, String> {
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            match self.column_for_field(field) {
                Some(col) => columns.push(col.to_string()),
                None => return Err((*field).to_string()),
            }
        }
        Ok(columns)
    }
}
