use std::ops::Range;

///
/// Page window arithmetic
///
/// 1-based pages over an already-materialized row sequence. An out-of-range
/// page produces an empty slice rather than an error; the view composer
/// detects the empty window and snaps back to page 1. All sizing is
/// saturating in the usize domain.
///

/// Index range of one page. `page == 0` is treated as page 1.
#[must_use]
pub fn page_slice(len: usize, page: u32, page_size: u32) -> Range<usize> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);

    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);

    start..end
}

/// Number of pages needed for `len` rows, never below 1 so an empty
/// collection still renders page 1 of 1.
#[must_use]
pub fn page_count(len: usize, page_size: u32) -> u32 {
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    if size == 0 || len == 0 {
        return 1;
    }

    u32::try_from(len.div_ceil(size)).unwrap_or(u32::MAX)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{page_count, page_slice};

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_slice(12, 1, 10), 0..10);
    }

    #[test]
    fn last_page_is_a_partial_slice() {
        assert_eq!(page_slice(12, 2, 10), 10..12);
    }

    #[test]
    fn out_of_range_page_yields_an_empty_slice() {
        let range = page_slice(12, 5, 10);
        assert!(range.is_empty());
        assert_eq!(range, 12..12);
    }

    #[test]
    fn page_zero_is_treated_as_page_one() {
        assert_eq!(page_slice(5, 0, 3), 0..3);
    }

    #[test]
    fn zero_page_size_yields_an_empty_slice() {
        assert!(page_slice(5, 1, 0).is_empty());
    }

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        assert_eq!(page_count(12, 10), 2);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(5, 0), 1);
    }
}
