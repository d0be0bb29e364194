use crate::errors::{ModelError, Result};
use crate::parameters::{GroupAverageParams, GroupAverageValidParams};

use homeval_data::FeatureTable;
use linfa::prelude::{DatasetBase, Fit};
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Global mean used when fitting on an empty label vector
pub const EMPTY_FIT_GLOBAL_MEAN: f64 = 0.0;

/// Statistics memorized at fit time and used later on in predictions
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct GroupMeans {
    /// Mean label per group key
    means: BTreeMap<String, f64>,
    /// Number of fitted rows per group key
    counts: BTreeMap<String, usize>,
    /// Mean of all fitted labels, fallback for unseen or missing keys
    global_mean: f64,
    /// Number of fitted rows
    n_samples: usize,
}

impl GroupMeans {
    fn compute(keys: &[Option<String>], labels: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> Self {
        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        keys.iter()
            .zip(labels.iter())
            .filter_map(|(key, &y)| key.as_deref().map(|k| (k, y)))
            .for_each(|(key, y)| {
                let acc = sums.entry(key).or_insert((0., 0));
                acc.0 += y;
                acc.1 += 1;
            });

        let means = sums
            .iter()
            .map(|(&key, &(sum, count))| (key.to_string(), sum / count as f64))
            .collect();
        let counts = sums
            .iter()
            .map(|(&key, &(_, count))| (key.to_string(), count))
            .collect();
        GroupMeans {
            means,
            counts,
            global_mean: labels.mean().unwrap_or(EMPTY_FIT_GLOBAL_MEAN),
            n_samples: labels.len(),
        }
    }

    fn is_finite(&self) -> bool {
        self.global_mean.is_finite() && self.means.values().all(|m| m.is_finite())
    }

    /// Prediction for one group key
    pub fn predict_key(&self, key: Option<&str>) -> f64 {
        key.and_then(|k| self.means.get(k))
            .copied()
            .unwrap_or(self.global_mean)
    }

    /// Mean label per group key
    pub fn means(&self) -> &BTreeMap<String, f64> {
        &self.means
    }

    /// Number of fitted rows per group key
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Mean of all fitted labels
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Number of fitted rows
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
}

/// Baseline regressor predicting the average label of the group a row
/// belongs to.
///
/// At fit time the mean label is memorized for each distinct value of the
/// group column (e.g. the neighborhood of a house) along with the mean of
/// all labels. At predict time a row gets the mean of its group, or the
/// global mean when its group was never seen during fit or is missing.
/// No other column is consulted.
///
/// Rows with a missing group value are left out of every group but still
/// count toward the global mean. Fitting an empty dataset is allowed: no
/// group is memorized and the global mean is [`EMPTY_FIT_GLOBAL_MEAN`].
///
/// # Example
///
/// ```
/// use homeval_data::FeatureTable;
/// use homeval_models::GroupAverageRegressor;
/// use ndarray::array;
///
/// let train = FeatureTable::new(vec![("Neighborhood", vec!["A", "A", "B"].into())]).unwrap();
/// let mut model = GroupAverageRegressor::new("Neighborhood");
/// model.fit(&train, &array![100., 200., 300.]).unwrap();
///
/// let test = FeatureTable::new(vec![("Neighborhood", vec!["A", "B", "C"].into())]).unwrap();
/// assert_eq!(model.predict(&test).unwrap(), array![150., 300., 200.]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct GroupAverageRegressor {
    /// Categorical column partitioning rows
    group_column: String,
    /// Fitted statistics, `None` until the first fit
    state: Option<GroupMeans>,
}

impl GroupAverageRegressor {
    /// Group average parameters constructor
    pub fn params<S: Into<String>>(group_column: S) -> GroupAverageParams {
        GroupAverageParams::new(group_column)
    }

    /// Unfitted regressor averaging over `group_column`
    pub fn new<S: Into<String>>(group_column: S) -> Self {
        GroupAverageRegressor {
            group_column: group_column.into(),
            state: None,
        }
    }

    /// Fit the regressor, replacing any previously memorized statistics.
    ///
    /// Fails when `features` and `labels` row counts differ, when the
    /// group column is absent or when labels (or their means) are not finite.
    /// On failure the previous state is kept.
    pub fn fit(
        &mut self,
        features: &FeatureTable,
        labels: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    ) -> Result<&mut Self> {
        if features.nrows() != labels.len() {
            return Err(ModelError::ShapeMismatch {
                features: features.nrows(),
                labels: labels.len(),
            });
        }
        if labels.iter().any(|y| !y.is_finite()) {
            return Err(ModelError::InvalidValueError(
                "labels must be finite".to_string(),
            ));
        }
        let keys = features.group_keys(&self.group_column)?;
        let state = GroupMeans::compute(&keys, labels);
        if !state.is_finite() {
            return Err(ModelError::InvalidValueError(format!(
                "label means over `{}` overflow",
                self.group_column
            )));
        }
        debug!(
            "Group average fitted on {} rows: {} groups over `{}`, global mean = {}",
            state.n_samples,
            state.means.len(),
            self.group_column,
            state.global_mean
        );
        self.state = Some(state);
        Ok(self)
    }

    /// Predict one value per row of `features`, in row order.
    pub fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| ModelError::Unfitted(self.to_string()))?;
        let keys = features.group_keys(&self.group_column)?;
        Ok(keys
            .iter()
            .map(|key| state.predict_key(key.as_deref()))
            .collect())
    }

    /// Name of the group column
    pub fn group_column(&self) -> &str {
        &self.group_column
    }

    /// Whether fit was called successfully at least once
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted statistics
    pub fn state(&self) -> Option<&GroupMeans> {
        self.state.as_ref()
    }

    /// Mean label per group key
    pub fn group_means(&self) -> Option<&BTreeMap<String, f64>> {
        self.state.as_ref().map(GroupMeans::means)
    }

    /// Mean label of a given group
    pub fn group_mean(&self, key: &str) -> Option<f64> {
        self.state.as_ref().and_then(|s| s.means.get(key).copied())
    }

    /// Number of fitted rows of a given group
    pub fn group_count(&self, key: &str) -> Option<usize> {
        self.state.as_ref().and_then(|s| s.counts.get(key).copied())
    }

    /// Mean of all fitted labels
    pub fn global_mean(&self) -> Option<f64> {
        self.state.as_ref().map(GroupMeans::global_mean)
    }

    /// Save model in given json file.
    #[cfg(feature = "persistent")]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        crate::save_model(self, path)
    }
}

impl fmt::Display for GroupAverageRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => {
                let n = state.means.len();
                let plural = if n == 1 { "" } else { "s" };
                write!(f, "GroupAverage({}, {} group{})", self.group_column, n, plural)
            }
            None => write!(f, "GroupAverage({}, unfitted)", self.group_column),
        }
    }
}

impl<D: Data<Elem = f64>> Fit<FeatureTable, ArrayBase<D, Ix1>, ModelError>
    for GroupAverageValidParams
{
    type Object = GroupAverageRegressor;

    /// Fit group means on the dataset records and targets
    fn fit(&self, dataset: &DatasetBase<FeatureTable, ArrayBase<D, Ix1>>) -> Result<Self::Object> {
        let mut model = GroupAverageRegressor::new(self.group_column());
        model.fit(dataset.records(), dataset.targets())?;
        Ok(model)
    }
}
