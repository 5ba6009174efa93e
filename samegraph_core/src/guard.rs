use std::collections::{HashMap, HashSet};

/// Tracks identity pairs already visited during one top-level match call,
/// stopping infinite recursion on cyclic graphs and redundant re-comparison
/// of shared substructure.
///
/// Each distinct reference address is assigned a monotonic id in a side
/// table; the visited set stores pairs of ids. Membership is decided purely
/// by storage identity, never by content equality.
#[derive(Default)]
pub struct CycleGuard {
    ids: HashMap<usize, u32>,
    visited: HashSet<(u32, u32)>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&mut self, expected: usize, actual: usize) -> bool {
        let pair = (self.id_of(expected), self.id_of(actual));
        self.visited.contains(&pair)
    }

    pub fn mark_seen(&mut self, expected: usize, actual: usize) {
        let pair = (self.id_of(expected), self.id_of(actual));
        self.visited.insert(pair);
    }

    fn id_of(&mut self, address: usize) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(address).or_insert(next)
    }
}
