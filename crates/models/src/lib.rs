//! This library implements the regression models compared on housing prices.
//!
//! The reference point is [GroupAverageRegressor], a baseline estimator
//! predicting the average price of the group (e.g. the neighborhood) a house
//! belongs to, and falling back to the overall average price for groups never
//! seen during training. Any more sophisticated model is judged against it.
//!
//! Every model exposes the [Regressor] capability (predict one value per row
//! of a [`FeatureTable`](homeval_data::FeatureTable)), which is all the
//! evaluation harness relies on. Besides the baseline, a prefit
//! [LinearRegressor] can be loaded from disk.
//!
//! # Features
//!
//! ## serializable
//!
//! The `serializable` feature enables serialization of models based on the
//! [serde crate](https://serde.rs/), [PersistentRegressor] trait objects being tagged
//! with their variant name thanks to [typetag](https://docs.rs/typetag).
//!
//! ## persistent
//!
//! The `persistent` feature enables [`save_model()`]/[`load_model()`]
//! to/from a json file using the [serde_json crate](https://docs.rs/serde_json).
//! Save and load tests are only compiled with this feature:
//!
//! ```text
//! cargo test -p homeval-models --features persistent
//! ```
//!
//! The root `homeval` package enables it, so `cargo test --workspace` runs them too.
//!
//! # Example
//!
//! ```
//! use homeval_data::FeatureTable;
//! use homeval_models::{GroupAverageRegressor, Regressor};
//! use linfa::{traits::Fit, DatasetBase};
//! use ndarray::array;
//!
//! let train = FeatureTable::new(vec![
//!     ("Neighborhood", vec!["NAmes", "NAmes", "OldTown"].into()),
//! ])
//! .unwrap();
//! let dataset = DatasetBase::new(train, array![100_000., 140_000., 90_000.]);
//!
//! let model = GroupAverageRegressor::params("Neighborhood")
//!     .fit(&dataset)
//!     .expect("baseline fitted");
//!
//! let test = FeatureTable::new(vec![
//!     ("Neighborhood", vec![Some("OldTown"), Some("Gilbert"), None].into()),
//! ])
//! .unwrap();
//! let model: Box<dyn Regressor> = Box::new(model);
//! let preds = model.predict(&test).unwrap();
//! assert_eq!(preds, array![90_000., 110_000., 110_000.]);
//! ```
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod algorithm;
mod errors;
mod linear;
mod parameters;
mod regressor;

pub use algorithm::*;
pub use errors::*;
pub use linear::*;
pub use parameters::*;
pub use regressor::*;
