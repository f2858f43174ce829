//! Pure function over [`MemberTable`] and the local `timeout_counter` that
//! decides which entries to evict.

use crate::table::{MemberEntry, MemberTable};

/// Collects, then evicts, every entry whose grace period has elapsed —
/// collect-then-evict keeps the scan safe under removal.
///
/// Returns the evicted entries so the caller can emit `NODE_REMOVED`
/// events and notification-channel traffic for each one.
pub fn evict_expired(
    table: &mut MemberTable,
    timeout_counter: i64,
    tremove: i64,
) -> Vec<MemberEntry> {
    let expired: Vec<u32> = table
        .iter()
        .filter(|e| timeout_counter - e.timestamp > tremove)
        .map(|e| e.id)
        .collect();

    expired
        .into_iter()
        .filter_map(|id| table.evict(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_only_entries_past_tremove() {
        let mut t = MemberTable::new();
        t.insert(2, 0, 0, 0); // timestamp 0
        t.insert(3, 0, 0, 15); // timestamp 15

        // timeout_counter = 21, tremove = 20 -> entry 2 (21-0=21>20) evicted,
        // entry 3 (21-15=6<=20) survives.
        let evicted = evict_expired(&mut t, 21, 20);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].id, 2);
        assert!(!t.contains(2));
        assert!(t.contains(3));
    }

    #[test]
    fn boundary_is_inclusive_of_tremove() {
        let mut t = MemberTable::new();
        t.insert(2, 0, 0, 0);
        // exactly TREMOVE ticks elapsed: must still survive.
        let evicted = evict_expired(&mut t, 20, 20);
        assert!(evicted.is_empty());
        assert!(t.contains(2));
    }

    #[test]
    fn safe_when_all_entries_expire() {
        let mut t = MemberTable::new();
        for id in 2..6 {
            t.insert(id, 0, 0, 0);
        }
        let evicted = evict_expired(&mut t, 100, 20);
        assert_eq!(evicted.len(), 4);
        assert!(t.is_empty());
    }
}
