pub mod internal_structure;
pub mod identities;
pub mod initialization;
pub mod find_best_map;
pub mod rrhc;
pub mod scoring;
pub mod schedule;

pub use self::initialization::{Pairs, initial_node_correspondences};
pub use self::find_best_map::{find_best_map, FindBestMapArgs, SearchOutcome};
pub use self::rrhc::{SeedMatcher, HillClimbing};
pub use self::scoring::{fscore, score, Counts, Score, Dimension, DimensionCounts, GraphScore, Discrepancies};
pub use self::schedule::{evaluate, intersect, schedule, run_pair, EvaluationResult, PairOutcome, PairResult};
