//! Tabular data handling for housing price models.
//!
//! A [`FeatureTable`] holds named numeric or categorical columns, a [`Split`]
//! pairs it with the aligned label vector. Tables are read from CSV files
//! (see [`read_csv`]) and a single dataset can be partitioned with the seeded
//! [`train_test_split`].
//!
//! `FeatureTable` implements [`linfa::dataset::Records`] so that it can be
//! used as records of a [`linfa::DatasetBase`] when fitting estimators.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
pub mod loader;
mod errors;
mod split;
mod table;

pub use loader::{load_split, parse_csv, read_csv, CsvOptions};
pub use errors::*;
pub use split::*;
pub use table::*;
