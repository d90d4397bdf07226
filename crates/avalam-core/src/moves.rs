//! The per-turn legal-move index announced by the controller.

use crate::position::Position;

/// Legal moves for the current turn, grouped by source.
///
/// The controller announces the complete set for one turn in a single
/// ACTIONS message; the index is replaced wholesale each time and cleared
/// when a move is committed. Announcement order is preserved, both across
/// sources and within a source's destination list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveIndex {
    groups: Vec<MoveGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveGroup {
    source: Position,
    destinations: Vec<Position>,
}

impl MoveIndex {
    /// Creates an empty index.
    pub fn new() -> MoveIndex {
        Default::default()
    }

    /// Replaces the whole index with one announcement's `(from, to)` pairs.
    pub fn replace(&mut self, moves: impl IntoIterator<Item = (Position, Position)>) {
        self.groups.clear();
        for (from, to) in moves {
            match self.groups.iter_mut().find(|group| group.source == from) {
                Some(group) => group.destinations.push(to),
                None => self.groups.push(MoveGroup {
                    source: from,
                    destinations: vec![to],
                }),
            }
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Whether no moves are announced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct sources.
    #[inline]
    pub fn source_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of announced `(from, to)` pairs.
    pub fn move_count(&self) -> usize {
        self.groups
            .iter()
            .map(|group| group.destinations.len())
            .sum()
    }

    /// Whether `source` has at least one announced move.
    pub fn contains_source(&self, source: Position) -> bool {
        self.groups.iter().any(|group| group.source == source)
    }

    /// Returns the announced destinations for `source`, in order.
    pub fn destinations(&self, source: Position) -> Option<&[Position]> {
        self.groups
            .iter()
            .find(|group| group.source == source)
            .map(|group| group.destinations.as_slice())
    }

    /// Whether `(from, to)` is one of the announced moves.
    pub fn is_move(&self, from: Position, to: Position) -> bool {
        self.destinations(from)
            .is_some_and(|destinations| destinations.contains(&to))
    }

    /// Iterates over the sources in announcement order.
    pub fn sources(&self) -> impl Iterator<Item = Position> + '_ {
        self.groups.iter().map(|group| group.source)
    }
}
