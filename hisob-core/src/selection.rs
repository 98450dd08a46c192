//! Per-user "category picked, awaiting amount" state.
//!
//! One slot per user: picking again overwrites, canceling clears, a
//! successful amount consumes. The board is plain in-process state — it
//! holds UX context, not financial state, and is allowed to vanish on
//! restart. Callers in a concurrent host serialize access per user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::UserId;
use crate::taxonomy::Category;

#[derive(Debug, Clone, Copy)]
pub struct PendingSelection {
    pub category: &'static Category,
    pub picked_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SelectionBoard {
    slots: HashMap<UserId, PendingSelection>,
}

impl SelectionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a category pick, overwriting any earlier pending one.
    pub fn pick(&mut self, user: UserId, category: &'static Category, now: DateTime<Utc>) {
        self.slots.insert(
            user,
            PendingSelection {
                category,
                picked_at: now,
            },
        );
    }

    pub fn pending(&self, user: UserId) -> Option<&PendingSelection> {
        self.slots.get(&user)
    }

    /// Consume the pending selection (on a successful amount parse).
    pub fn take(&mut self, user: UserId) -> Option<PendingSelection> {
        self.slots.remove(&user)
    }

    /// Explicit cancel; returns whether anything was pending.
    pub fn cancel(&mut self, user: UserId) -> bool {
        self.slots.remove(&user).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy;

    #[test]
    fn test_pick_take_cycle() {
        let mut board = SelectionBoard::new();
        let taxi = taxonomy::by_id("taxi").unwrap();
        let now = Utc::now();

        assert!(board.pending(1).is_none());
        board.pick(1, taxi, now);
        assert_eq!(board.pending(1).unwrap().category.id, "taxi");

        let taken = board.take(1).unwrap();
        assert_eq!(taken.category.id, "taxi");
        assert!(board.pending(1).is_none());
    }

    #[test]
    fn test_new_pick_overwrites_silently() {
        let mut board = SelectionBoard::new();
        let now = Utc::now();
        board.pick(1, taxonomy::by_id("taxi").unwrap(), now);
        board.pick(1, taxonomy::by_id("lent").unwrap(), now);
        assert_eq!(board.pending(1).unwrap().category.id, "lent");
    }

    #[test]
    fn test_cancel_clears_without_side_effect() {
        let mut board = SelectionBoard::new();
        board.pick(7, taxonomy::by_id("food").unwrap(), Utc::now());
        assert!(board.cancel(7));
        assert!(board.pending(7).is_none());
        assert!(!board.cancel(7));
    }

    #[test]
    fn test_slots_are_per_user() {
        let mut board = SelectionBoard::new();
        let now = Utc::now();
        board.pick(1, taxonomy::by_id("taxi").unwrap(), now);
        board.pick(2, taxonomy::by_id("food").unwrap(), now);
        assert_eq!(board.pending(1).unwrap().category.id, "taxi");
        assert_eq!(board.pending(2).unwrap().category.id, "food");
        board.take(1);
        assert!(board.pending(2).is_some());
    }
}
