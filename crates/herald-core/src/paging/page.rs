//! One bounded batch of results from a paginated source.

use super::request::PageRequest;

/// A page of items plus the request for the page that follows it, if any.
///
/// `next == None` marks the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, R = PageRequest> {
    items: Vec<T>,
    next: Option<R>,
}

impl<T, R> Page<T, R> {
    pub fn new(items: Vec<T>, next: Option<R>) -> Self {
        Self { items, next }
    }

    /// The final page of a source.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_request(&self) -> Option<&R> {
        self.next.as_ref()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<R>) {
        (self.items, self.next)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U, R> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }
}

impl<T: Clone> Page<T, PageRequest> {
    /// Cuts the page described by `request` out of an in-memory result set.
    pub fn slice(all: &[T], request: &PageRequest) -> Self {
        let start = usize::try_from(request.offset())
            .unwrap_or(usize::MAX)
            .min(all.len());
        let end = start.saturating_add(request.size as usize).min(all.len());
        let next = (request.size > 0 && end < all.len()).then(|| request.next());
        Self::new(all[start..end].to_vec(), next)
    }
}
