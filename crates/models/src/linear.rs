use crate::errors::Result;

use homeval_data::FeatureTable;
use ndarray::Array1;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A prefit linear model over named numeric columns:
///
/// `y = intercept + sum(coefficient[c] * x[c])`
///
/// It is meant to be loaded from a file produced elsewhere, no training
/// procedure is provided. A missing cell (`NaN`) gives a `NaN` prediction
/// for its row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: BTreeMap<String, f64>,
}

impl LinearRegressor {
    /// Constant model returning `intercept` until coefficients are added
    pub fn new(intercept: f64) -> Self {
        LinearRegressor {
            intercept,
            coefficients: BTreeMap::new(),
        }
    }

    /// Set the coefficient applied to `column`
    pub fn coefficient<S: Into<String>>(mut self, column: S, value: f64) -> Self {
        self.coefficients.insert(column.into(), value);
        self
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient per column
    pub fn coefficients(&self) -> &BTreeMap<String, f64> {
        &self.coefficients
    }

    /// Predict one value per row of `features`.
    ///
    /// Every column having a coefficient must be present and numeric.
    pub fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>> {
        let mut y = Array1::from_elem(features.nrows(), self.intercept);
        for (column, &coef) in &self.coefficients {
            let x = features.numeric(column)?;
            y.scaled_add(coef, &x);
        }
        Ok(y)
    }
}

impl fmt::Display for LinearRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.coefficients.len();
        write!(f, "Linear({} coefficient{})", n, if n == 1 { "" } else { "s" })
    }
}
