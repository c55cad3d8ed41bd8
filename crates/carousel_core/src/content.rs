//! Item / thumbnail pairing
//!
//! Content arrives as two lists: the items themselves and, optionally, one
//! thumbnail per item. Mismatched lists are tolerated; the item stands in for
//! any thumbnail that is missing.

use tracing::warn;

const PAIRING_HELP: &str = "Provide at least as many items as thumbnails, or no thumbnails at all.";

/// Pick the thumbnail shown for each item
///
/// - No thumbnails: every item is its own thumbnail.
/// - More thumbnails than items: the thumbnails are ignored.
/// - Fewer thumbnails than items: each unmatched item is its own thumbnail.
pub fn pair_thumbnails<T: Clone>(items: &[T], thumbnails: &[T]) -> Vec<T> {
    if thumbnails.is_empty() {
        return items.to_vec();
    }

    if thumbnails.len() > items.len() {
        warn!(
            "Falling back to items as thumbnails: {} thumbnail(s) for {} item(s). {}",
            thumbnails.len(),
            items.len(),
            PAIRING_HELP
        );
        return items.to_vec();
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match thumbnails.get(index) {
            Some(thumbnail) => thumbnail.clone(),
            None => {
                warn!(
                    "Item {} has no thumbnail counterpart, using the item itself. {}",
                    index, PAIRING_HELP
                );
                item.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_thumbnails() {
        assert_eq!(pair_thumbnails(&["a", "b"], &[]), vec!["a", "b"]);
    }

    #[test]
    fn test_matching_thumbnails() {
        assert_eq!(
            pair_thumbnails(&["a", "b"], &["ta", "tb"]),
            vec!["ta", "tb"]
        );
    }

    #[test]
    fn test_too_many_thumbnails_falls_back() {
        assert_eq!(
            pair_thumbnails(&["a"], &["ta", "tb"]),
            vec!["a"]
        );
    }

    #[test]
    fn test_missing_thumbnails_use_item() {
        assert_eq!(
            pair_thumbnails(&["a", "b", "c"], &["ta"]),
            vec!["ta", "b", "c"]
        );
    }

    #[test]
    fn test_empty_items() {
        let empty: [&str; 0] = [];
        assert!(pair_thumbnails(&empty, &empty).is_empty());
    }
}
