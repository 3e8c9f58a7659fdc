// doc constants
pub const DOC_REVISION: &str = "_revision";
pub const DOC_MODIFIED: &str = "_modified";
pub const DOC_SOURCE: &str = "_source";
pub const DOC_ID: &str = "_id";
pub const RESERVED_FIELDS: [&str; 4] = [DOC_ID, DOC_REVISION, DOC_MODIFIED, DOC_SOURCE];

// nitrite constants
pub const NO2: &str = "NO\u{2082}";
pub const DEFAULT_FIELD_SEPARATOR: &str = ".";

// error messages
pub const REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED: &str =
    "remove on projected object iterator is not supported";
pub const NO_MORE_ELEMENTS: &str = "projected object iterator has no more elements";

pub const NITRITE_PROJECTION_VERSION: &str = env!("CARGO_PKG_VERSION");
