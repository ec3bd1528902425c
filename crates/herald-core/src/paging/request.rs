//! Offset-based page cursor.

use serde::{Deserialize, Serialize};

/// Identifies one page of an offset-paginated source.
///
/// `page` is zero-based. Sources that paginate with continuation tokens can
/// use their own cursor type instead; `Page` and `PageableCollection` are
/// generic over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// First page with the given size.
    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_keeps_size_and_advances_offset() {
        let request = PageRequest::first(20);
        let next = request.next();

        assert_eq!(request.offset(), 0);
        assert_eq!(next, PageRequest::new(1, 20));
        assert_eq!(next.offset(), 20);
    }
}
