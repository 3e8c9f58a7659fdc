//! # Nitrite Projection
//!
//! Lazy, typed projections over the schema-less documents of a Nitrite style
//! document store.
//!
//! A query result is a sequence of [`collection::Document`]s, each carrying
//! its store identity in the reserved `_id` field. A
//! [`common::ProjectedObjectIterable`] wraps such a sequence and hands out
//! domain objects instead: every document is copied, stripped of `_id` and
//! converted by a [`common::NitriteMapper`] only when the caller pulls it.
//!
//! ## Key Features
//!
//! - **Lazy**: nothing is converted before it is iterated
//! - **Non-destructive**: source records are never modified
//! - **Pass-through metadata**: `size`, `total_count` and `has_more` come from the source
//! - **Read-only**: removing through a projection is always rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use nitrite_projection::collection::{Document, FindOptions};
//! use nitrite_projection::common::{
//!     read_field, Convertible, ConvertibleMapper, DocumentCursor, RecordIterable, Value,
//! };
//! use nitrite_projection::doc;
//! use nitrite_projection::errors::{ErrorKind, NitriteError, NitriteResult};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Employee {
//!     name: String,
//! }
//!
//! impl Convertible for Employee {
//!     type Output = Employee;
//!
//!     fn to_value(&self) -> NitriteResult<Value> {
//!         Ok(Value::Document(doc!{ name: (self.name.clone()) }))
//!     }
//!
//!     fn from_value(value: &Value) -> NitriteResult<Self::Output> {
//!         match value {
//!             Value::Document(doc) => Ok(Employee { name: read_field::<String>(doc, "name")? }),
//!             _ => Err(NitriteError::new("not an employee", ErrorKind::ObjectMappingError)),
//!         }
//!     }
//! }
//!
//! # fn main() -> NitriteResult<()> {
//! let cursor = DocumentCursor::new(
//!     vec![doc!{ name: "Alice" }, doc!{ name: "Bob" }],
//!     FindOptions::new().limit(1),
//! )?;
//! let employees = cursor.project::<Employee, _>(ConvertibleMapper);
//!
//! assert_eq!(employees.to_list()?, vec![Employee { name: "Alice".into() }]);
//! assert_eq!(employees.total_count(), 2);
//! assert!(employees.has_more());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, ids and paging options
//! - [`common`] - Values, conversion, mappers and record streams
//! - [`errors`] - Error types and result definitions
//! - [`nitrite_config`] - Field separator configuration

use crate::collection::snowflake::SnowflakeIdGenerator;
use crate::common::*;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod errors;
pub mod nitrite_config;

pub(crate) static FIELD_SEPARATOR: LazyLock<Atomic<String>> =
    LazyLock::new(|| atomic(DEFAULT_FIELD_SEPARATOR.to_string()));
pub(crate) static ID_GENERATOR: LazyLock<SnowflakeIdGenerator> =
    LazyLock::new(SnowflakeIdGenerator::new);
