use crate::collection::Document;
use crate::common::{NitriteMapper, ProjectedObjectIterable};
use crate::errors::NitriteResult;
use std::sync::Arc;

/// A re-iterable sequence of query results.
///
/// Every call to [`RecordIterable::iter`] starts a fresh pass over the
/// results. Whether two passes observe the same records is up to the
/// implementation; a source over a live result set may change between passes.
///
/// `size`, `total_count` and `has_more` describe the result page and are
/// answered without iterating.
pub trait RecordIterable {
    type Item;
    type Iter<'a>: Iterator<Item = NitriteResult<Self::Item>>
    where
        Self: 'a;

    /// Starts a new pass over the results.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns `true` if results exist beyond the current page.
    fn has_more(&self) -> bool;

    /// Number of results on the current page.
    fn size(&self) -> usize;

    /// Number of results matching the query, across all pages.
    fn total_count(&self) -> usize;

    /// Returns the first result, or `None` if there is none.
    fn first(&self) -> NitriteResult<Option<Self::Item>> {
        self.iter().next().transpose()
    }

    /// Returns the first result, or the default value of the item type if
    /// there is none.
    fn first_or_default(&self) -> NitriteResult<Self::Item>
    where
        Self::Item: Default,
    {
        Ok(self.first()?.unwrap_or_default())
    }

    /// Collects a full pass into a list.
    ///
    /// The first failing result aborts the collection and its error is
    /// returned; no partial list is produced.
    fn to_list(&self) -> NitriteResult<Vec<Self::Item>> {
        self.iter().collect()
    }

    /// Projects every document of this source into `P` with `mapper`.
    fn project<P, M>(self, mapper: M) -> ProjectedObjectIterable<Self, M, P>
    where
        Self: RecordIterable<Item = Document> + Sized,
        M: NitriteMapper<P>,
    {
        ProjectedObjectIterable::new(mapper, self)
    }
}

impl<R> RecordIterable for &R
where
    R: RecordIterable + ?Sized,
{
    type Item = R::Item;
    type Iter<'a> = R::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }

    fn has_more(&self) -> bool {
        (**self).has_more()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn total_count(&self) -> usize {
        (**self).total_count()
    }
}

impl<R> RecordIterable for Arc<R>
where
    R: RecordIterable + ?Sized,
{
    type Item = R::Item;
    type Iter<'a> = R::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }

    fn has_more(&self) -> bool {
        (**self).has_more()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn total_count(&self) -> usize {
        (**self).total_count()
    }
}
