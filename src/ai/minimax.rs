use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SearchError;
use crate::game::{Board, GameState, Move, Player};

use super::agent::Agent;
use super::cache::{Bound, CacheEntry, CacheScope, PositionCache, TranspositionCache};
use super::evaluator::{evaluate, Score};

/// Default search depth below each root move.
pub const DEFAULT_DEPTH: u32 = 6;

/// Which bound type a completed node is cached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundPolicy {
    /// Classify the result against the node's window: `Exact` inside it,
    /// `UpperBound` on a fail-low, `LowerBound` on a fail-high.
    Window,
    /// Maximizing nodes store `LowerBound`, minimizing nodes `UpperBound`,
    /// never `Exact`.
    Reference,
}

impl BoundPolicy {
    fn classify(self, score: Score, alpha: Score, beta: Score, maximizing: bool) -> Bound {
        match self {
            BoundPolicy::Window if score <= alpha => Bound::UpperBound,
            BoundPolicy::Window if score >= beta => Bound::LowerBound,
            BoundPolicy::Window => Bound::Exact,
            BoundPolicy::Reference if maximizing => Bound::LowerBound,
            BoundPolicy::Reference => Bound::UpperBound,
        }
    }
}

/// Search configuration, loadable from the `[search]` TOML section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each root move.
    pub depth: u32,
    pub bound_policy: BoundPolicy,
    /// Take an immediate win, or block an immediate loss, before searching.
    pub tactical_shortcuts: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            bound_policy: BoundPolicy::Window,
            tactical_shortcuts: true,
        }
    }
}

/// Counters for one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Alpha-beta cutoffs inside the move loop.
    pub cutoffs: u64,
    /// Nodes answered from the cache without expansion.
    pub cache_cutoffs: u64,
    pub elapsed: Duration,
}

/// How the chosen move was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    ImmediateWin,
    ForcedBlock,
    FullSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: Score,
    pub kind: SearchKind,
    pub stats: SearchStats,
}

/// One search over an owned working board, mutated in place by apply/undo.
struct Search<'a> {
    board: Board,
    maximizer: Player,
    cache: &'a mut dyn PositionCache,
    policy: BoundPolicy,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(
        board: Board,
        maximizer: Player,
        cache: &'a mut dyn PositionCache,
        policy: BoundPolicy,
    ) -> Self {
        Search {
            board,
            maximizer,
            cache,
            policy,
            stats: SearchStats::default(),
        }
    }

    /// First legal move that completes a line for `player`.
    fn winning_move(&mut self, player: Player) -> Option<Move> {
        let moves = self.board.legal_moves();
        moves.iter().copied().find(|&mv| {
            self.board.play(mv, player);
            let wins = self.board.check_win(mv.row, mv.col);
            self.board.undo(mv);
            wins
        })
    }

    /// Score of playing `mv` for the maximizer, searched `depth` plies further.
    fn score_root_move(&mut self, mv: Move, depth: u32) -> Score {
        self.board.play(mv, self.maximizer);
        let score = self.minimax(depth, Score::Loss, Score::Win, false);
        self.board.undo(mv);
        score
    }

    fn minimax(&mut self, depth: u32, mut alpha: Score, mut beta: Score, maximizing: bool) -> Score {
        self.stats.nodes += 1;

        let score = evaluate(&self.board, self.maximizer);
        if score != Score::NEUTRAL {
            return score;
        }
        if depth == 0 || self.board.is_full() {
            return Score::NEUTRAL;
        }

        if let Some(entry) = self.cache.lookup(&self.board) {
            if entry.usable_at(depth) {
                match entry.bound {
                    Bound::Exact => {
                        self.stats.cache_cutoffs += 1;
                        return entry.score;
                    }
                    Bound::LowerBound => alpha = alpha.max(entry.score),
                    Bound::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    self.stats.cache_cutoffs += 1;
                    return entry.score;
                }
            }
        }

        let (alpha0, beta0) = (alpha, beta);
        let (player, mut best) = if maximizing {
            (self.maximizer, Score::Loss)
        } else {
            (self.maximizer.other(), Score::Win)
        };

        let moves = self.board.legal_moves();
        for &mv in moves.iter() {
            self.board.play(mv, player);
            let score = self.minimax(depth - 1, alpha, beta, !maximizing);
            self.board.undo(mv);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = self.policy.classify(best, alpha0, beta0, maximizing);
        self.cache.store(
            self.board,
            CacheEntry {
                bound,
                depth,
                score: best,
            },
        );
        best
    }
}

/// Minimax player with alpha-beta pruning and an injected transposition cache.
pub struct MinimaxAgent {
    config: SearchConfig,
    player: Player,
    cache: Box<dyn PositionCache>,
    scope: CacheScope,
    /// Maximizer and root piece parity the cached entries were stored under.
    /// Together they fix which nodes maximize, so entries stay valid only
    /// while both are unchanged.
    cache_owner: Option<(Player, usize)>,
}

impl MinimaxAgent {
    /// Agent with the default configuration and an unbounded persistent cache.
    pub fn new(player: Player) -> Self {
        Self::with_cache(
            SearchConfig::default(),
            player,
            Box::new(TranspositionCache::new()),
        )
    }

    pub fn from_config(config: &SolverConfig, player: Player) -> Self {
        Self::with_cache(config.search.clone(), player, config.cache.build())
            .with_scope(config.cache.scope)
    }

    pub fn with_cache(config: SearchConfig, player: Player, cache: Box<dyn PositionCache>) -> Self {
        MinimaxAgent {
            config,
            player,
            cache,
            scope: CacheScope::Persistent,
            cache_owner: None,
        }
    }

    pub fn with_scope(mut self, scope: CacheScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn depth(&self) -> u32 {
        self.config.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.config.depth = depth;
    }

    pub fn cache(&self) -> &dyn PositionCache {
        &*self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.cache_owner = None;
    }

    /// Best move for this agent's player. The caller's board is not modified.
    pub fn pick_best_move(&mut self, board: &Board) -> Result<SearchOutcome, SearchError> {
        self.pick_best_move_for(board, self.player)
    }

    /// Best move for `player`, who is the maximizer for this search.
    ///
    /// `player` need not be the side a legal game would have to move. The
    /// cache is cleared whenever the maximizer or the parity of the root's
    /// piece count changes from the previous call.
    ///
    /// Root moves are tried deepest landing row first, centre first, and the
    /// first move with the strictly greatest score is kept, so equal moves are
    /// broken by that ordering.
    pub fn pick_best_move_for(
        &mut self,
        board: &Board,
        player: Player,
    ) -> Result<SearchOutcome, SearchError> {
        let start = Instant::now();
        let moves = board.legal_moves();
        let fallback = *moves.first().ok_or(SearchError::NoLegalMove)?;

        let owner = (player, board.piece_count() % 2);
        if self.cache_owner != Some(owner) || self.scope == CacheScope::PerMove {
            if let Some(previous) = self.cache_owner.filter(|&previous| previous != owner) {
                debug!("cache was filled for {previous:?}, clearing for {owner:?}");
            }
            self.cache.clear();
            self.cache_owner = Some(owner);
        }

        let depth = self.config.depth;
        let mut search = Search::new(*board, player, &mut *self.cache, self.config.bound_policy);

        let (best_move, score, kind) = 'pick: {
            if self.config.tactical_shortcuts {
                if let Some(mv) = search.winning_move(player) {
                    break 'pick (mv, Score::Win, SearchKind::ImmediateWin);
                }
                if let Some(mv) = search.winning_move(player.other()) {
                    let score = search.score_root_move(mv, depth);
                    break 'pick (mv, score, SearchKind::ForcedBlock);
                }
            }

            let mut best = (fallback, Score::Loss);
            for &mv in moves.iter() {
                let score = search.score_root_move(mv, depth);
                trace!("column {} scores {score}", mv.col + 1);
                if score > best.1 {
                    best = (mv, score);
                }
            }
            (best.0, best.1, SearchKind::FullSearch)
        };

        debug_assert_eq!(&search.board, board, "search left the working board modified");

        let mut stats = search.stats;
        stats.elapsed = start.elapsed();
        debug!(
            "{player:?} plays column {} ({kind:?}, score {score}): {} nodes, {} cutoffs, {} cached, {} entries in {:?}",
            best_move.col + 1,
            stats.nodes,
            stats.cutoffs,
            stats.cache_cutoffs,
            self.cache.len(),
            stats.elapsed,
        );

        Ok(SearchOutcome {
            best_move,
            score,
            kind,
            stats,
        })
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::NoLegalMove);
        }
        let outcome = self.pick_best_move_for(state.board(), state.current_player())?;
        Ok(outcome.best_move.col)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
