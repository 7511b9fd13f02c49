use log::warn;
use rustc_hash::FxHashMap;

use crate::game::Board;

use super::evaluator::Score;

/// When the cache is emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    /// Kept for the lifetime of the agent, across moves.
    Persistent,
    /// Cleared at the start of every move computation.
    PerMove,
}

/// Cache configuration, loadable from the `[cache]` TOML section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub scope: CacheScope,
    /// Upper bound on stored positions; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            scope: CacheScope::Persistent,
            max_entries: None,
        }
    }
}

impl CacheConfig {
    /// Build the cache this configuration describes.
    pub fn build(&self) -> Box<dyn PositionCache> {
        match (self.enabled, self.max_entries) {
            (false, _) => Box::new(NullCache::default()),
            (true, Some(max)) => Box::new(TranspositionCache::bounded(max)),
            (true, None) => Box::new(TranspositionCache::new()),
        }
    }
}

/// How a cached score relates to the true value of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the value of the position at the stored depth.
    Exact,
    /// The value is at least the score.
    LowerBound,
    /// The value is at most the score.
    UpperBound,
}

/// A memoized search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub bound: Bound,
    /// Remaining depth the position was searched to.
    pub depth: u32,
    pub score: Score,
}

impl CacheEntry {
    /// An entry may only shortcut a search at most as deep as its own.
    pub fn usable_at(&self, depth: u32) -> bool {
        self.depth >= depth
    }
}

/// Counters describing cache traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub lookups: u64,
    pub hits: u64,
    pub stores: u64,
    pub flushes: u64,
}

impl CacheStats {
    /// Fraction of lookups that found an entry.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / self.lookups as f64
    }
}

/// Memo of search results keyed by the full board.
///
/// Misses are a normal outcome, never an error.
pub trait PositionCache {
    fn lookup(&mut self, board: &Board) -> Option<CacheEntry>;

    /// Record an entry; the last write for a board wins.
    fn store(&mut self, board: Board, entry: CacheEntry);

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

/// Transposition table keyed by exact board contents.
///
/// Keys compare structurally, so two different positions never share an
/// entry. Unbounded unless built with [`TranspositionCache::bounded`]; a
/// bounded table is flushed whenever a new position would overflow it.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: FxHashMap<Board, CacheEntry>,
    max_entries: Option<usize>,
    stats: CacheStats,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding at most `max_entries` positions.
    pub fn bounded(max_entries: usize) -> Self {
        TranspositionCache {
            max_entries: Some(max_entries.max(1)),
            ..Self::default()
        }
    }
}

impl PositionCache for TranspositionCache {
    fn lookup(&mut self, board: &Board) -> Option<CacheEntry> {
        self.stats.lookups += 1;
        let entry = self.entries.get(board).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    fn store(&mut self, board: Board, entry: CacheEntry) {
        if let Some(max) = self.max_entries {
            if self.entries.len() >= max && !self.entries.contains_key(&board) {
                warn!("transposition cache full ({max} entries), flushing");
                self.entries.clear();
                self.stats.flushes += 1;
            }
        }
        self.entries.insert(board, entry);
        self.stats.stores += 1;
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Cache that remembers nothing; searching with it is plain alpha-beta.
#[derive(Debug, Default)]
pub struct NullCache {
    stats: CacheStats,
}

impl PositionCache for NullCache {
    fn lookup(&mut self, _board: &Board) -> Option<CacheEntry> {
        self.stats.lookups += 1;
        None
    }

    fn store(&mut self, _board: Board, _entry: CacheEntry) {}

    fn clear(&mut self) {}

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }
}
