//! Documents and identities, the raw records a projection consumes.
//!
//! A `Document` is a key-value map where keys are strings and values are `Value` objects.
//! Documents support nested fields using a configurable separator (default: ".").
//!
//! ```rust
//! use nitrite_projection::collection::Document;
//!
//! # fn main() -> nitrite_projection::errors::NitriteResult<()> {
//! let mut doc = Document::new();
//! doc.put("name", "Alice")?;
//! doc.put("address.city", "New York")?;
//! doc.put("age", 30i64)?;
//! assert_eq!(doc.get("address.city")?.as_string().map(String::as_str), Some("New York"));
//! # Ok(())
//! # }
//! ```
//!
//! # Document IDs
//!
//! Each stored document has a unique `_id` field containing a `NitriteId`. The ID is
//! generated using a Snowflake algorithm when a record source first sees the document.
//!
//! # Reserved Fields
//!
//! The following fields are reserved and managed by the store:
//! - `_id` - Document ID
//! - `_revision` - Revision number
//! - `_source` - Document source
//! - `_modified` - Last modification timestamp

mod document;
mod find_options;
mod nitrite_id;
pub(crate) mod snowflake;

pub use document::*;
pub use find_options::*;
pub use nitrite_id::NitriteId;
