//! RankLab Core — deterministic risk/return analytics over a price matrix.
//!
//! The pipeline turns a validated price table into a stable, auditable
//! ranking:
//! - Per-instrument metrics: period return, annualized volatility, max drawdown
//! - Min-max normalization across the current universe
//! - Weighted integer scoring with unconditional hard-stop overrides
//! - Quality flags for downstream traceability
//! - Stable multi-key ranking with dense 1-based ranks
//!
//! Every stage is a pure function over immutable inputs. Nothing in this
//! crate performs I/O, keeps state between runs, or depends on wall-clock
//! time; repeated runs on the same input produce identical output.

pub mod flags;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod score;
pub mod table;

pub use flags::QualityFlags;
pub use metrics::{MetricsRecord, TRADING_DAYS};
pub use normalize::min_max_normalize;
pub use pipeline::{run_pipeline, PipelineError};
pub use rank::{rank_universe, RankedRow, RankedTable};
pub use score::{score_universe, ConfigError, ScoredRecord, ScoringConfig};
pub use table::{PriceTable, TableError};
