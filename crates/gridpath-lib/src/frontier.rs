use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::cell::Position;

/// Discovered-but-not-yet-expanded cells, popped by ascending score.
///
/// Entries with equal scores pop in insertion order. An exact
/// `(score, position)` pair is held at most once; the same position may
/// still appear under different scores.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashSet<(u32, Position)>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `(score, position)` unless the pair is already queued.
    /// Returns `true` when the entry was added.
    pub fn push(&mut self, score: u32, position: Position) -> bool {
        if !self.members.insert((score, position)) {
            return false;
        }
        self.heap.push(FrontierEntry {
            score,
            seq: self.next_seq,
            position,
        });
        self.next_seq += 1;
        true
    }

    /// Remove and return the lowest-score entry.
    pub fn pop(&mut self) -> Option<(u32, Position)> {
        let entry = self.heap.pop()?;
        self.members.remove(&(entry.score, entry.position));
        Some((entry.score, entry.position))
    }

    pub fn contains(&self, score: u32, position: Position) -> bool {
        self.members.contains(&(score, position))
    }

    /// Whether `position` is queued under any score.
    pub fn contains_position(&self, position: Position) -> bool {
        self.heap.iter().any(|entry| entry.position == position)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued entries in pop order, without draining the frontier.
    pub fn entries(&self) -> Vec<(u32, Position)> {
        let mut entries: Vec<_> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries
            .into_iter()
            .map(|entry| (entry.score, entry.position))
            .collect()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    score: u32,
    seq: u64,
    position: Position,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by score, then age.
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_score_first() {
        let mut frontier = Frontier::new();
        frontier.push(5, Position::new(0, 0));
        frontier.push(2, Position::new(1, 1));
        frontier.push(9, Position::new(2, 2));

        assert_eq!(frontier.pop(), Some((2, Position::new(1, 1))));
        assert_eq!(frontier.pop(), Some((5, Position::new(0, 0))));
        assert_eq!(frontier.pop(), Some((9, Position::new(2, 2))));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn equal_scores_pop_in_insertion_order() {
        let mut frontier = Frontier::new();
        let order = [
            Position::new(3, 3),
            Position::new(0, 1),
            Position::new(2, 0),
        ];
        for position in order {
            frontier.push(4, position);
        }

        let popped: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|(_, position)| position)
            .collect();
        assert_eq!(popped, order);
    }

    #[test]
    fn duplicate_pairs_are_ignored() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(3, Position::new(1, 0)));
        assert!(!frontier.push(3, Position::new(1, 0)));
        assert!(frontier.push(4, Position::new(1, 0)));
        assert_eq!(frontier.len(), 2);
        assert!(frontier.contains_position(Position::new(1, 0)));
    }

    #[test]
    fn popped_pairs_can_be_queued_again() {
        let mut frontier = Frontier::new();
        frontier.push(3, Position::new(1, 0));
        frontier.pop();
        assert!(!frontier.contains(3, Position::new(1, 0)));
        assert!(frontier.push(3, Position::new(1, 0)));
    }

    #[test]
    fn entries_are_listed_in_pop_order() {
        let mut frontier = Frontier::new();
        frontier.push(7, Position::new(0, 0));
        frontier.push(1, Position::new(0, 1));
        frontier.push(7, Position::new(0, 2));

        assert_eq!(
            frontier.entries(),
            vec![
                (1, Position::new(0, 1)),
                (7, Position::new(0, 0)),
                (7, Position::new(0, 2)),
            ]
        );
        assert_eq!(frontier.len(), 3);
    }
}
