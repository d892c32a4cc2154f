use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::Item;

/// Orders items for the placement pass by `(-priority, expiry_or_∞, -volume)`
/// (spec.md §4.B): highest priority first, earliest expiry first among equal
/// priorities (missing expiry sorts last), largest volume first as the final
/// tiebreak.
///
/// Grounded on `original_source/app/services/placement.py`'s `_prepare_items`
/// key and on the teacher's `algorithms::est::ordering::compare_same_kind`
/// idiom of a chain of early-return comparisons ending in a stable tiebreak.
pub fn compare_for_placement(a: &Item, b: &Item) -> Ordering {
    let by_priority = b.priority().cmp(&a.priority());
    if by_priority != Ordering::Equal {
        return by_priority;
    }

    let by_expiry = expiry_key(a).cmp(&expiry_key(b));
    if by_expiry != Ordering::Equal {
        return by_expiry;
    }

    let by_volume = f64::total_cmp(&b.volume(), &a.volume());
    if by_volume != Ordering::Equal {
        return by_volume;
    }

    a.id().cmp(b.id())
}

fn expiry_key(item: &Item) -> DateTime<Utc> {
    item.expiry().unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Sorts `items` in place by [`compare_for_placement`].
pub fn sort_for_placement(items: &mut [&Item]) {
    items.sort_by(|a, b| compare_for_placement(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;
    use chrono::TimeZone;

    fn item(id: &str, priority: u8, expiry: Option<DateTime<Utc>>, volume: f64) -> Item {
        let side = volume.cbrt();
        Item::new(
            id,
            id,
            Dimensions::from_f64(side, side, side),
            1.0,
            priority,
            expiry,
            None,
            "Lab",
        )
        .unwrap()
    }

    #[test]
    fn higher_priority_sorts_first() {
        let low = item("low", 10, None, 1.0);
        let high = item("high", 90, None, 1.0);
        assert_eq!(compare_for_placement(&high, &low), Ordering::Less);
    }

    #[test]
    fn equal_priority_earlier_expiry_first() {
        let soon = item("soon", 50, Some(Utc.timestamp_opt(10, 0).unwrap()), 1.0);
        let later = item("later", 50, Some(Utc.timestamp_opt(20, 0).unwrap()), 1.0);
        assert_eq!(compare_for_placement(&soon, &later), Ordering::Less);
    }

    #[test]
    fn missing_expiry_sorts_last() {
        let no_expiry = item("none", 50, None, 1.0);
        let has_expiry = item("some", 50, Some(Utc.timestamp_opt(10, 0).unwrap()), 1.0);
        assert_eq!(compare_for_placement(&has_expiry, &no_expiry), Ordering::Less);
    }

    #[test]
    fn equal_priority_and_expiry_larger_volume_first() {
        let small = item("small", 50, None, 1.0);
        let big = item("big", 50, None, 8.0);
        assert_eq!(compare_for_placement(&big, &small), Ordering::Less);
    }
}
