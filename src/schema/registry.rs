//! Simple schema registrar.
//!
//! Resolves the (scope, name prefix, entity descriptor) triple once, at
//! client construction time. The registrar is read-only afterwards and is
//! shared by reference with the query client.

use super::{EntityDef, SchemaError};
use std::sync::Arc;

/// Single-entity registrar binding an [`EntityDef`] to a storage scope and
/// name prefix.
///
/// # Example
///
/// ```
/// use dockhand::schema::{ColumnType, EntityDef, FieldDef, Registrar};
///
/// let entity = EntityDef::new(
///     "User",
///     vec![
///         FieldDef::new("ID", "id", ColumnType::Int64).partition_key(),
///         FieldDef::new("Email", "email", ColumnType::Text),
///     ],
/// )?;
/// let registrar = Registrar::new("test", "team.service", entity)?;
/// assert_eq!(registrar.entity().name(), "User");
/// # Ok::<(), dockhand::schema::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Registrar {
    scope: String,
    name_prefix: String,
    entity: Arc<EntityDef>,
}

impl Registrar {
    /// Build a registrar for one entity.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyScope`] when scope or prefix is empty and
    /// [`SchemaError::NoPartitionKey`] when the entity cannot be point-read.
    pub fn new(scope: &str, name_prefix: &str, entity: EntityDef) -> Result<Self, SchemaError> {
        if scope.is_empty() || name_prefix.is_empty() {
            return Err(SchemaError::EmptyScope);
        }
        if !entity.has_partition_key() {
            return Err(SchemaError::NoPartitionKey(entity.name().to_string()));
        }
        Ok(Registrar {
            scope: scope.to_string(),
            name_prefix: name_prefix.to_string(),
            entity: Arc::new(entity),
        })
    }

    /// Storage scope the entity lives in.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Name prefix applied to the entity within the scope.
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// The resolved entity descriptor.
    pub fn entity(&self) -> &EntityDef {
        &self.entity
    }
}
