// ABOUTME: Keep-first-K retention policy shared by revision and image cleanup.
// ABOUTME: Pure slicing over a newest-first list; never reorders.

/// Entries of a newest-first list that fall outside a window of `keep`.
///
/// Returns everything after the first `keep` entries in input order, or an
/// empty slice when the list fits the window. `keep = 0` selects the whole list.
pub fn prune<T>(ordered: &[T], keep: usize) -> &[T] {
    ordered.get(keep..).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_newest_and_returns_tail() {
        let revisions = ["r3", "r2", "r1", "r0"];
        assert_eq!(prune(&revisions, 2), ["r1", "r0"]);
    }

    #[test]
    fn list_within_window_prunes_nothing() {
        assert!(prune(&["d1", "d2"], 2).is_empty());
        assert!(prune(&["d1"], 10).is_empty());
        assert!(prune::<&str>(&[], 1).is_empty());
    }

    #[test]
    fn zero_keep_prunes_everything() {
        assert_eq!(prune(&[1, 2, 3], 0), [1, 2, 3]);
    }

    proptest! {
        #[test]
        fn tail_after_first_k(list in proptest::collection::vec(any::<u16>(), 0..40), keep in 0usize..50) {
            let tail = prune(&list, keep);
            prop_assert_eq!(tail.len(), list.len().saturating_sub(keep));
            let skipped = keep.min(list.len());
            prop_assert_eq!(tail, &list[skipped..]);
        }
    }
}
