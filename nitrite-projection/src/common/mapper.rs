use crate::collection::Document;
use crate::common::{Convertible, Value};
use crate::errors::{ErrorKind, NitriteError, NitriteResult};
use std::sync::Arc;

/// Converts one record into one instance of the projection target `P`.
///
/// Implementations receive the record by shared reference and so cannot
/// alter it. They must be deterministic: the same document always maps to the
/// same value or the same error. Any error returned here reaches the caller
/// of the projection unchanged.
pub trait NitriteMapper<P> {
    fn convert(&self, document: &Document) -> NitriteResult<P>;
}

/// Mapper backed by the target's [Convertible] implementation.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::common::{ConvertibleMapper, NitriteMapper};
/// use nitrite_projection::doc;
///
/// let mapper = ConvertibleMapper::new();
/// let doc = doc!{ name: "a" };
/// let same: nitrite_projection::collection::Document = mapper.convert(&doc).unwrap();
/// assert_eq!(same, doc);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertibleMapper;

impl ConvertibleMapper {
    pub fn new() -> Self {
        ConvertibleMapper
    }

    /// Converts an object back into a document.
    pub fn to_document<T: Convertible>(&self, object: &T) -> NitriteResult<Document> {
        match object.to_value()? {
            Value::Document(document) => Ok(document),
            other => {
                log::error!("Object converts to {} which is not a document", other);
                Err(NitriteError::new(
                    "Object is not convertible to a document",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl<P> NitriteMapper<P> for ConvertibleMapper
where
    P: Convertible<Output = P>,
{
    fn convert(&self, document: &Document) -> NitriteResult<P> {
        P::from_value(&Value::Document(document.clone()))
    }
}

impl<P, M> NitriteMapper<P> for &M
where
    M: NitriteMapper<P> + ?Sized,
{
    fn convert(&self, document: &Document) -> NitriteResult<P> {
        (**self).convert(document)
    }
}

impl<P, M> NitriteMapper<P> for Arc<M>
where
    M: NitriteMapper<P> + ?Sized,
{
    fn convert(&self, document: &Document) -> NitriteResult<P> {
        (**self).convert(document)
    }
}

impl<P, M> NitriteMapper<P> for Box<M>
where
    M: NitriteMapper<P> + ?Sized,
{
    fn convert(&self, document: &Document) -> NitriteResult<P> {
        (**self).convert(document)
    }
}
