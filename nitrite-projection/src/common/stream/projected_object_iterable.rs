use crate::collection::Document;
use crate::common::{
    NitriteMapper, RecordIterable, DOC_ID, NO_MORE_ELEMENTS,
    REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED,
};
use crate::errors::{ErrorKind, NitriteError, NitriteResult};
use std::fmt::{Debug, Display, Formatter};
use std::iter::Peekable;
use std::marker::PhantomData;

/// A read-only view of a document source in which every record appears as an
/// instance of `P`.
///
/// Each record is copied, stripped of its `_id` field and handed to the
/// mapper. The source records are never modified, and nothing is converted
/// before it is iterated. `size`, `total_count` and `has_more` are those of
/// the source, asked afresh on every call.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::common::{ConvertibleMapper, DocumentCursor, RecordIterable};
/// use nitrite_projection::doc;
///
/// let cursor = DocumentCursor::all(vec![doc!{ name: "a" }, doc!{ name: "b" }]).unwrap();
/// let names = cursor.project::<nitrite_projection::collection::Document, _>(ConvertibleMapper);
///
/// let first = names.first().unwrap().unwrap();
/// assert!(!first.has_id());
/// assert_eq!(names.size(), 2);
/// ```
pub struct ProjectedObjectIterable<R, M, P> {
    records: R,
    mapper: M,
    _phantom: PhantomData<fn() -> P>,
}

impl<R, M, P> ProjectedObjectIterable<R, M, P>
where
    R: RecordIterable<Item = Document>,
    M: NitriteMapper<P>,
{
    pub fn new(mapper: M, records: R) -> Self {
        ProjectedObjectIterable {
            records,
            mapper,
            _phantom: PhantomData,
        }
    }

    /// Renders the full projection as a list.
    ///
    /// Fails with the first mapping or source error instead of rendering a
    /// partial list.
    pub fn try_to_string(&self) -> NitriteResult<String>
    where
        P: Debug,
    {
        let list = self.to_list()?;
        Ok(format!("{:?}", list))
    }

    /// Returns the underlying record source.
    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }
}

impl<R, M, P> RecordIterable for ProjectedObjectIterable<R, M, P>
where
    R: RecordIterable<Item = Document>,
    M: NitriteMapper<P>,
{
    type Item = P;
    type Iter<'a> = ProjectedObjectIterator<'a, R::Iter<'a>, M, P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        ProjectedObjectIterator::new(self.records.iter(), &self.mapper)
    }

    fn has_more(&self) -> bool {
        self.records.has_more()
    }

    fn size(&self) -> usize {
        self.records.size()
    }

    fn total_count(&self) -> usize {
        self.records.total_count()
    }
}

impl<'a, R, M, P> IntoIterator for &'a ProjectedObjectIterable<R, M, P>
where
    R: RecordIterable<Item = Document>,
    M: NitriteMapper<P>,
{
    type Item = NitriteResult<P>;
    type IntoIter = ProjectedObjectIterator<'a, R::Iter<'a>, M, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R, M, P> Display for ProjectedObjectIterable<R, M, P>
where
    R: RecordIterable<Item = Document>,
    M: NitriteMapper<P>,
    P: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.try_to_string() {
            Ok(rendered) => write!(f, "{}", rendered),
            Err(err) => write!(f, "<{}: {}>", err.kind(), err.message()),
        }
    }
}

impl<R, M, P> Debug for ProjectedObjectIterable<R, M, P>
where
    R: RecordIterable<Item = Document>,
    M: NitriteMapper<P>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectedObjectIterable")
            .field("size", &self.size())
            .field("total_count", &self.total_count())
            .field("has_more", &self.has_more())
            .finish()
    }
}

/// One pass of a [ProjectedObjectIterable].
///
/// Pulls one record from the source per step and converts it on demand. At
/// most one record is buffered, and only after [`Self::has_next`] looked
/// ahead.
pub struct ProjectedObjectIterator<'a, I, M, P>
where
    I: Iterator<Item = NitriteResult<Document>>,
{
    records: Peekable<I>,
    mapper: &'a M,
    _phantom: PhantomData<fn() -> P>,
}

impl<'a, I, M, P> ProjectedObjectIterator<'a, I, M, P>
where
    I: Iterator<Item = NitriteResult<Document>>,
    M: NitriteMapper<P>,
{
    pub(crate) fn new(records: I, mapper: &'a M) -> Self {
        ProjectedObjectIterator {
            records: records.peekable(),
            mapper,
            _phantom: PhantomData,
        }
    }

    /// Returns `true` if the source has another record.
    ///
    /// Does not convert anything; a record that fails to map still counts.
    pub fn has_next(&mut self) -> bool {
        self.records.peek().is_some()
    }

    /// Like [`Iterator::next`], but an exhausted source is an error.
    pub fn try_next(&mut self) -> NitriteResult<P> {
        match self.next() {
            Some(result) => result,
            None => {
                log::error!("{}", NO_MORE_ELEMENTS);
                Err(NitriteError::new(
                    NO_MORE_ELEMENTS,
                    ErrorKind::IteratorExhausted,
                ))
            }
        }
    }

    /// Always fails: a projection cannot remove records from its source.
    pub fn remove(&mut self) -> NitriteResult<()> {
        log::error!("{}", REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED);
        Err(NitriteError::new(
            REMOVE_ON_PROJECTED_ITERATOR_NOT_SUPPORTED,
            ErrorKind::InvalidOperation,
        ))
    }

    fn project(&self, record: &Document) -> NitriteResult<P> {
        // clone shares structure with the source record, removing from it
        // leaves the source untouched. `_id` is a literal top-level key, so it
        // must not go through embedded path resolution.
        let mut working_copy = record.clone();
        working_copy.remove_key(DOC_ID);
        self.mapper.convert(&working_copy)
    }
}

impl<I, M, P> Iterator for ProjectedObjectIterator<'_, I, M, P>
where
    I: Iterator<Item = NitriteResult<Document>>,
    M: NitriteMapper<P>,
{
    type Item = NitriteResult<P>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => Some(self.project(&record)),
            Err(err) => Some(Err(err)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}
