//! Pagination constants for the list operation.

/// Items per page when the caller does not say.
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 10;

/// Number of items to skip for a 1-based `page` of `size` items.
///
/// Page 0 is treated like page 1; overflow saturates.
pub fn page_offset(page: u64, size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_zero_based_from_one_based_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 2), 4);
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(u64::MAX, u64::MAX), u64::MAX);
    }
}
