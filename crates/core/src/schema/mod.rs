//! Schema module for Quiver.
//!
//! A schema is an ordered list of fields. It is a plain value: two schemas are
//! interchangeable whenever they compare equal.

mod field;

pub use field::Field;

use crate::error::{Error, Result};
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Shared, immutable schema handle.
pub type SchemaRef = Arc<Schema>;

/// Ordered collection of fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates a schema from the given fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Creates a schema, failing when two fields share a name.
    pub fn try_new(fields: Vec<Field>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate field name '{}'",
                    field.name()
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Creates a schema with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the fields in order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the field at the given position.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this schema has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the position of the field with the given name.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Returns the field with the given name.
    pub fn field_with_name(&self, name: &str) -> Result<&Field> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// Projects the schema onto the requested names, in request order.
    ///
    /// An empty projection selects every field. Names that are not part of the
    /// schema are skipped; use [`Schema::try_select`] to reject them instead.
    ///
    /// The result follows the order of `projection`, not the order of this
    /// schema: selecting `["salary", "id"]` yields `[salary, id]`.
    pub fn select<S: AsRef<str>>(&self, projection: &[S]) -> Schema {
        if projection.is_empty() {
            return self.clone();
        }
        let fields = projection
            .iter()
            .filter_map(|name| self.field_with_name(name.as_ref()).ok().cloned())
            .collect();
        Schema::new(fields)
    }

    /// Projects the schema onto the requested names, failing on unknown names.
    pub fn try_select<S: AsRef<str>>(&self, projection: &[S]) -> Result<Schema> {
        if projection.is_empty() {
            return Ok(self.clone());
        }
        let fields = projection
            .iter()
            .map(|name| self.field_with_name(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Schema::new(fields))
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", field)?;
        }
        f.write_str("]")
    }
}
