//! `homeval` compares housing price regression models on a shared train/test
//! split, the reference being an average price per neighborhood baseline.
//!
//! The workspace is organized in three crates, re-exported here:
//!
//! * [`data`]: feature tables, CSV loading and seeded train/test split,
//! * [`models`]: the [`GroupAverageRegressor`](models::GroupAverageRegressor)
//!   baseline, the `Regressor` capability and model persistence,
//! * [`eval`]: error metrics, the `evaluate` harness and model comparisons.
//!
//! This crate adds the text [`report`] of a comparison and the [`cli`] of
//! the `homeval` binary.
//!
//! # Logging
//!
//! Libraries log through the [log](https://docs.rs/log) facade. The binary
//! uses [env_logger](https://docs.rs/env_logger) configured from the
//! `HOMEVAL_LOG` environment variable (default `info`), e.g.
//! `HOMEVAL_LOG=debug homeval compare --data train.csv`.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
pub mod cli;
pub mod report;

pub use homeval_data as data;
pub use homeval_eval as eval;
pub use homeval_models as models;

/// Environment variable holding the log filter of the binary
pub const HOMEVAL_LOG: &str = "HOMEVAL_LOG";
