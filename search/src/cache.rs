use std::sync::Mutex;

use game::{Move, Score, Zobrist};

pub const DEFAULT_CACHE_SIZE: usize = 16;
pub const MAX_CACHE_SIZE: usize = 512;
pub const MIN_CACHE_SIZE: usize = 1;

/// The number of independently locked stripes; a power of two so the stripe of
/// a key is a cheap mask.
const NUM_STRIPES: usize = 256;

/// The transposition hash table caches previously performed search results.
///
/// The table is shared between all worker threads. Instead of a single lock it
/// is split into stripes with one mutex each, so probes and stores of different
/// stripes never contend. A key selects its stripe with `key % NUM_STRIPES` and
/// its slot within the stripe with `(key / NUM_STRIPES) % stripe_capacity`.
pub struct Cache {
    stripes: Vec<Mutex<Vec<Option<CacheEntry>>>>,
}

impl Cache {
    /// Creates a new `Cache` with a total allocated size in megabytes.
    pub fn new(megabytes: usize) -> Self {
        let length = megabytes * 1024 * 1024 / std::mem::size_of::<CacheEntry>();
        let stripe_length = (length / NUM_STRIPES).max(1);

        Self {
            stripes: (0..NUM_STRIPES)
                .map(|_| Mutex::new(vec![None; stripe_length]))
                .collect(),
        }
    }

    /// Sets all entries to `None` without affecting the allocated memory.
    pub fn clear(&self) {
        for stripe in &self.stripes {
            let mut entries = stripe.lock().unwrap();
            entries.iter_mut().for_each(|entry| *entry = None);
        }
    }

    /// Returns `Some(CacheEntry)` if the entry was found; otherwise `None`.
    /// Mate scores are adjusted back to be relative to the probing ply.
    pub fn read(&self, hash: Zobrist, ply: usize) -> Option<CacheEntry> {
        let entries = self.stripes[self.stripe(hash)].lock().unwrap();

        let mut entry = entries[self.slot(hash, entries.len())]?;
        if entry.hash == hash {
            entry.adjust_mating_score(-(ply as i32));
            return Some(entry);
        }

        None
    }

    /// Writes an entry to the `Cache`, replacing the existing one when the new
    /// entry comes from a search at least as deep, or when the slot is empty.
    pub fn write(&self, mut entry: CacheEntry, ply: usize) {
        entry.adjust_mating_score(ply as i32);

        let mut entries = self.stripes[self.stripe(entry.hash)].lock().unwrap();

        let slot = self.slot(entry.hash, entries.len());
        let replace = match entries[slot] {
            Some(existing) => entry.depth >= existing.depth,
            None => true,
        };

        if replace {
            entries[slot] = Some(entry);
        }
    }

    #[inline(always)]
    fn stripe(&self, hash: Zobrist) -> usize {
        hash.0 as usize % NUM_STRIPES
    }

    #[inline(always)]
    fn slot(&self, hash: Zobrist, stripe_length: usize) -> usize {
        (hash.0 as usize / NUM_STRIPES) % stripe_length
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[derive(Copy, Clone, PartialEq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Copy, Clone)]
pub struct CacheEntry {
    pub hash: Zobrist,
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
    pub mv: Move,
}

impl CacheEntry {
    /// Creates a new `CacheEntry`.
    pub fn new(hash: Zobrist, depth: i32, score: Score, bound: Bound, mv: Move) -> Self {
        Self {
            hash,
            depth: depth as u8,
            score,
            bound,
            mv,
        }
    }

    /// Adjusts the mating score of the `CacheEntry` by the given adjustment.
    ///
    /// This is used to ensure that the mating score is always the same distance
    /// from the root, no matter which ply the entry is probed at.
    fn adjust_mating_score(&mut self, adjustment: i32) {
        if self.score.is_mating() {
            self.score.0 += adjustment;
        } else if self.score.is_getting_mated() {
            self.score.0 -= adjustment;
        }
    }
}

#[cfg(test)]
mod tests {
    use game::{Move, Score, Zobrist};

    use super::{Bound, Cache, CacheEntry};

    #[test]
    fn read_returns_only_matching_keys() {
        let cache = Cache::new(1);

        let entry = CacheEntry::new(Zobrist(42), 5, Score(100), Bound::Exact, Move::NULL);
        cache.write(entry, 0);

        assert!(cache.read(Zobrist(42), 0).is_some());
        assert!(cache.read(Zobrist(43), 0).is_none());
    }

    #[test]
    fn deeper_entries_are_preferred() {
        let cache = Cache::new(1);

        cache.write(CacheEntry::new(Zobrist(42), 8, Score(100), Bound::Exact, Move::NULL), 0);
        cache.write(CacheEntry::new(Zobrist(42), 3, Score(-50), Bound::Exact, Move::NULL), 0);

        assert_eq!(cache.read(Zobrist(42), 0).unwrap().score, Score(100));

        cache.write(CacheEntry::new(Zobrist(42), 9, Score(25), Bound::Exact, Move::NULL), 0);
        assert_eq!(cache.read(Zobrist(42), 0).unwrap().score, Score(25));
    }

    #[test]
    fn mate_scores_are_ply_adjusted() {
        let cache = Cache::new(1);

        // A mate found 3 plies below the root is stored relative to the position
        let mate = Score::CHECKMATE - 5;
        cache.write(CacheEntry::new(Zobrist(7), 10, mate, Bound::Exact, Move::NULL), 3);

        // Probing at a different ply re-bases the distance to mate
        let probed = cache.read(Zobrist(7), 1).unwrap();
        assert_eq!(probed.score, mate + 3 - 1);
    }
}
