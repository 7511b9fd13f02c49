//! Move selection: terminal evaluation, the transposition cache, the
//! minimax search engine and the agents built on top of it.

mod agent;
pub mod cache;
pub mod evaluator;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use cache::{
    Bound, CacheConfig, CacheEntry, CacheScope, CacheStats, NullCache, PositionCache,
    TranspositionCache,
};
pub use evaluator::{evaluate, Score};
pub use minimax::{
    BoundPolicy, MinimaxAgent, SearchConfig, SearchKind, SearchOutcome, SearchStats, DEFAULT_DEPTH,
};
pub use random::RandomAgent;
