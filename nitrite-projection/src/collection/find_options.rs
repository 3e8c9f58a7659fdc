/// Paging options for a record source.
///
/// `FindOptions` selects the page of a result set that a
/// [`crate::common::DocumentCursor`] exposes. It supports method chaining.
///
/// # Examples
///
/// ```rust
/// use nitrite_projection::collection::{skip_by, FindOptions};
///
/// // skip(10).limit(20) exposes results 11-30
/// let options = FindOptions::new().skip(10).limit(20);
/// assert_eq!(options.skip_count(), Some(10));
/// assert_eq!(options.limit_count(), Some(20));
///
/// let options = skip_by(5);
/// assert_eq!(options.limit_count(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates `FindOptions` that skips the first `skip` results.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions {
        skip: Some(skip),
        limit: None,
    }
}

/// Creates `FindOptions` that returns at most `limit` results.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions {
        skip: None,
        limit: Some(limit),
    }
}

impl FindOptions {
    /// Creates options selecting the whole result set.
    pub fn new() -> Self {
        FindOptions::default()
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip_count(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit_count(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the `[start, end)` bounds of the page within a result set of
    /// `total` elements.
    pub(crate) fn page_bounds(&self, total: usize) -> (usize, usize) {
        let start = self
            .skip
            .map(|s| usize::try_from(s).unwrap_or(usize::MAX))
            .unwrap_or(0)
            .min(total);
        let end = match self.limit {
            Some(limit) => start
                .saturating_add(usize::try_from(limit).unwrap_or(usize::MAX))
                .min(total),
            None => total,
        };
        (start, end)
    }
}
