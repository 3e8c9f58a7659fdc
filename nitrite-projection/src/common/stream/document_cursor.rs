use crate::collection::{Document, FindOptions};
use crate::common::RecordIterable;
use crate::errors::NitriteResult;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A paged, in-memory result set of documents.
///
/// The cursor owns the full result set and exposes the page selected by its
/// [FindOptions]. Every document gets a [`crate::collection::NitriteId`]
/// when the cursor is created. Cloning a cursor or taking another page
/// shares the underlying result set.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::collection::FindOptions;
/// use nitrite_projection::common::{DocumentCursor, RecordIterable};
/// use nitrite_projection::doc;
///
/// let cursor = DocumentCursor::new(
///     vec![doc!{ n: 1 }, doc!{ n: 2 }, doc!{ n: 3 }],
///     FindOptions::new().limit(2),
/// ).unwrap();
///
/// assert_eq!(cursor.size(), 2);
/// assert_eq!(cursor.total_count(), 3);
/// assert!(cursor.has_more());
/// ```
#[derive(Clone)]
pub struct DocumentCursor {
    documents: Arc<Vec<Document>>,
    find_options: FindOptions,
    start: usize,
    end: usize,
}

impl DocumentCursor {
    pub fn new(documents: Vec<Document>, find_options: FindOptions) -> NitriteResult<Self> {
        let mut documents = documents;
        for document in documents.iter_mut() {
            document.id()?;
        }
        Ok(Self::with_shared(Arc::new(documents), find_options))
    }

    /// Creates a cursor exposing every document.
    pub fn all(documents: Vec<Document>) -> NitriteResult<Self> {
        DocumentCursor::new(documents, FindOptions::new())
    }

    /// Returns another page of the same result set.
    pub fn page(&self, find_options: FindOptions) -> DocumentCursor {
        Self::with_shared(self.documents.clone(), find_options)
    }

    pub fn find_options(&self) -> &FindOptions {
        &self.find_options
    }

    fn with_shared(documents: Arc<Vec<Document>>, find_options: FindOptions) -> Self {
        let (start, end) = find_options.page_bounds(documents.len());
        DocumentCursor {
            documents,
            find_options,
            start,
            end,
        }
    }
}

impl RecordIterable for DocumentCursor {
    type Item = Document;
    type Iter<'a> = DocumentCursorIter<'a>;

    fn iter(&self) -> Self::Iter<'_> {
        DocumentCursorIter {
            inner: self.documents[self.start..self.end].iter(),
        }
    }

    fn has_more(&self) -> bool {
        self.end < self.documents.len()
    }

    fn size(&self) -> usize {
        self.end - self.start
    }

    fn total_count(&self) -> usize {
        self.documents.len()
    }
}

impl<'a> IntoIterator for &'a DocumentCursor {
    type Item = NitriteResult<Document>;
    type IntoIter = DocumentCursorIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for DocumentCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCursor")
            .field("find_options", &self.find_options)
            .field("size", &self.size())
            .field("total_count", &self.total_count())
            .finish()
    }
}

/// One pass over the page of a [DocumentCursor].
pub struct DocumentCursorIter<'a> {
    inner: std::slice::Iter<'a, Document>,
}

impl Iterator for DocumentCursorIter<'_> {
    type Item = NitriteResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|doc| Ok(doc.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for DocumentCursorIter<'_> {}
