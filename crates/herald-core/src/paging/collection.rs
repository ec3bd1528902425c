//! Lazy, restartable sequence over a paginated source.
//!
//! The source is any `Fn(&R) -> Result<Page<T, R>, E>`: a repository query, an
//! HTTP call, a DynamoDB query with a continuation key. Pages are fetched only
//! when the buffered items of the current page run out.

use super::page::Page;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use tracing::trace;

/// A paged resource viewed as a collection.
///
/// Every call to [`iter`](Self::iter) starts a new traversal from the initial
/// request, so the same collection can be walked any number of times.
pub struct PageableCollection<T, R, E, S> {
    request: R,
    source: S,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, R, E, S> PageableCollection<T, R, E, S>
where
    S: Fn(&R) -> Result<Page<T, R>, E>,
{
    pub fn new(request: R, source: S) -> Self {
        Self {
            request,
            source,
            _marker: PhantomData,
        }
    }

    /// Starts a traversal.
    ///
    /// The first page is fetched immediately so that
    /// [`PageableIter::has_more`] can be answered before any item is taken;
    /// an error from that fetch is returned here.
    pub fn iter(&self) -> Result<PageableIter<'_, T, R, E, S>, E> {
        let page = (self.source)(&self.request)?;
        Ok(PageableIter::new(page, &self.source))
    }

    /// Walks every page and gathers all items.
    pub fn try_collect(&self) -> Result<Vec<T>, E> {
        self.iter()?.collect()
    }
}

/// One traversal session: the current page's buffered items and the request
/// for the page after it.
///
/// Yields `Err` once if the source fails while fetching a further page; the
/// traversal is over after that.
pub struct PageableIter<'a, T, R, E, S> {
    source: &'a S,
    items: std::vec::IntoIter<T>,
    next: Option<R>,
    _marker: PhantomData<fn() -> E>,
}

impl<'a, T, R, E, S> PageableIter<'a, T, R, E, S>
where
    S: Fn(&R) -> Result<Page<T, R>, E>,
{
    fn new(page: Page<T, R>, source: &'a S) -> Self {
        let (items, next) = page.into_parts();
        Self {
            source,
            items: items.into_iter(),
            next,
            _marker: PhantomData,
        }
    }

    /// True while buffered items remain or the current page reports a further
    /// page. Never fetches.
    pub fn has_more(&self) -> bool {
        self.items.len() > 0 || self.next.is_some()
    }
}

impl<T, R, E, S> Iterator for PageableIter<'_, T, R, E, S>
where
    S: Fn(&R) -> Result<Page<T, R>, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.items.next() {
                return Some(Ok(item));
            }

            // current page exhausted: move to the next one, if any
            let request = self.next.take()?;
            trace!("fetching next page");
            match (self.source)(&request) {
                Ok(page) => {
                    let (items, next) = page.into_parts();
                    self.items = items.into_iter();
                    self.next = next;
                }
                // `next` was taken, so the traversal ends here
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.items.len();
        if self.next.is_some() {
            (buffered, None)
        } else {
            (buffered, Some(buffered))
        }
    }
}

impl<T, R, E, S> FusedIterator for PageableIter<'_, T, R, E, S> where
    S: Fn(&R) -> Result<Page<T, R>, E>
{
}
