//! Evaluation of fitted regression models on train and test splits.
//!
//! The harness is model agnostic: [`evaluate`] only calls
//! [`Regressor::predict`](homeval_models::Regressor::predict) once per split
//! and scores the predictions with an injected [`Metric`]. A [`Comparison`]
//! runs the same evaluation over several models, keeping one outcome per model.
//!
//! # Example
//!
//! ```
//! use homeval_data::{FeatureTable, Split};
//! use homeval_eval::{Comparison, ErrorMetric};
//! use homeval_models::{GroupAverageRegressor, LinearRegressor};
//! use ndarray::array;
//!
//! let table = |hoods: Vec<&str>, areas: Vec<f64>| {
//!     FeatureTable::new(vec![("Neighborhood", hoods.into()), ("GrLivArea", areas.into())])
//!         .unwrap()
//! };
//! let train = Split::new(table(vec!["A", "B"], vec![10., 30.]), array![100., 300.]).unwrap();
//! let test = Split::new(table(vec!["A", "C"], vec![12., 20.]), array![120., 210.]).unwrap();
//!
//! let mut baseline = GroupAverageRegressor::new("Neighborhood");
//! baseline.fit(train.features(), train.labels()).unwrap();
//!
//! let outcomes = Comparison::new()
//!     .with_model("baseline", Box::new(baseline))
//!     .with_model("linear", Box::new(LinearRegressor::new(0.).coefficient("GrLivArea", 10.)))
//!     .run(&ErrorMetric::MeanAbsolute, &train, &test);
//!
//! let errors: Vec<f64> = outcomes
//!     .iter()
//!     .map(|o| o.result.as_ref().unwrap().test_error())
//!     .collect();
//! assert_eq!(errors, vec![15., 5.]);
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod comparison;
mod errors;
mod evaluation;
mod metrics;

pub use comparison::*;
pub use errors::*;
pub use evaluation::*;
pub use metrics::*;
