mod document_cursor;
mod projected_object_iterable;
mod record_iterable;

pub use document_cursor::*;
pub use projected_object_iterable::*;
pub use record_iterable::*;
