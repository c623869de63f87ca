/// Agent configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Items collected before the agent starts heading for the stairs.
    pub descend_item_threshold: u32,
    /// Items collected (after at least one descent) that end the episode.
    pub success_item_threshold: u32,
    /// Consecutive unchanged-position ticks tolerated before forcing a move.
    pub stuck_limit: u32,
    /// Ticks of random movement armed by the stuck and oscillation breakers.
    pub exploration_burst: u32,
    /// Chebyshev radius of the square marked seen around the agent each tick.
    pub fov_radius: u32,
    /// Tiles visited at least this often are never chosen as least-visited targets.
    pub least_visited_ceiling: u32,
    pub search: SearchLimits,
    pub frontier_order: FrontierOrder,
    /// Base seed for the random directions the policy draws.
    pub seed: u64,
}

/// Per-call-site revisit thresholds shared by the searches.
///
/// A tile whose visit count exceeds the threshold is not expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    /// Used by path-to-target, nearest-item and A* searches.
    pub path_revisit_threshold: u32,
    /// Used by the frontier search.
    pub frontier_revisit_threshold: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            path_revisit_threshold: AgentConfig::DEFAULT_PATH_REVISIT_THRESHOLD,
            frontier_revisit_threshold: AgentConfig::DEFAULT_FRONTIER_REVISIT_THRESHOLD,
        }
    }
}

/// Expansion order of the frontier search.
///
/// Breadth-first always yields the nearest unseen tile. Depth-first finds
/// *some* unseen tile, usually along the first corridor it dives into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontierOrder {
    #[default]
    BreadthFirst,
    DepthFirst,
}

impl AgentConfig {
    // ===== compile-time constants =====
    /// Length of the recent-action buffer.
    pub const HISTORY_LEN: usize = 10;
    /// Trailing actions inspected for a two-direction oscillation.
    pub const OSCILLATION_WINDOW: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DESCEND_ITEM_THRESHOLD: u32 = 3;
    pub const DEFAULT_SUCCESS_ITEM_THRESHOLD: u32 = 5;
    pub const DEFAULT_STUCK_LIMIT: u32 = 3;
    pub const DEFAULT_EXPLORATION_BURST: u32 = 5;
    pub const DEFAULT_FOV_RADIUS: u32 = 3;
    pub const DEFAULT_LEAST_VISITED_CEILING: u32 = 5;
    pub const DEFAULT_PATH_REVISIT_THRESHOLD: u32 = 10;
    pub const DEFAULT_FRONTIER_REVISIT_THRESHOLD: u32 = 15;

    pub fn new() -> Self {
        Self {
            descend_item_threshold: Self::DEFAULT_DESCEND_ITEM_THRESHOLD,
            success_item_threshold: Self::DEFAULT_SUCCESS_ITEM_THRESHOLD,
            stuck_limit: Self::DEFAULT_STUCK_LIMIT,
            exploration_burst: Self::DEFAULT_EXPLORATION_BURST,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            least_visited_ceiling: Self::DEFAULT_LEAST_VISITED_CEILING,
            search: SearchLimits::default(),
            frontier_order: FrontierOrder::default(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_frontier_order(mut self, order: FrontierOrder) -> Self {
        self.frontier_order = order;
        self
    }

    #[must_use]
    pub fn with_item_thresholds(mut self, descend: u32, success: u32) -> Self {
        self.descend_item_threshold = descend;
        self.success_item_threshold = success;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
