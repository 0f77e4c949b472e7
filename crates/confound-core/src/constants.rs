/// Confound version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum number of successful discovery candidates needed to build a consensus.
pub const MIN_CONSENSUS_CANDIDATES: usize = 2;

/// Default consensus quorum (edges need at least this many agreeing votes).
pub const DEFAULT_QUORUM: usize = 2;

/// Default cap on enumerated backdoor paths per (treatment, outcome) pair.
pub const DEFAULT_MAX_BACKDOOR_PATHS: usize = 100_000;

/// Minimum number of rows a sample needs for any discovery algorithm.
pub const MIN_SAMPLE_ROWS: usize = 3;

/// Algorithm names accepted by the discovery adapter.
pub const ALGORITHM_PC: &str = "pc";
pub const ALGORITHM_HILL_CLIMB: &str = "hill_climb";
pub const ALGORITHM_NOTEARS: &str = "notears";

/// All known discovery algorithm names, in default execution order.
pub const KNOWN_ALGORITHMS: &[&str] = &[ALGORITHM_PC, ALGORITHM_HILL_CLIMB, ALGORITHM_NOTEARS];
