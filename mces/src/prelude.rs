pub use settings::{Settings, Limits, LimitsConf};
pub use errors::{Error, ErrorKind, Result, ResultExt};
pub use evaluation_metrics::graph_matching::*;
pub use utils::Timer;
