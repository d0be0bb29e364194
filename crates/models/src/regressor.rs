use crate::algorithm::GroupAverageRegressor;
use crate::errors::Result;
use crate::linear::LinearRegressor;

use homeval_data::FeatureTable;
use ndarray::Array1;
use std::fmt;

#[cfg(feature = "persistent")]
use std::fs;
#[cfg(feature = "persistent")]
use std::io::Write;
#[cfg(feature = "persistent")]
use std::path::Path;

/// The capability shared by every model taking part in a comparison:
/// predicting one value per row of a features table.
///
/// Implementations must not mutate any state while predicting.
pub trait Regressor: fmt::Display + Send + Sync {
    /// Predict output values for each row of `features`, in row order.
    fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>>;
}

impl<R: Regressor + ?Sized> Regressor for Box<R> {
    fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>> {
        (**self).predict(features)
    }
}

/// A regressor which can be saved to and loaded from disk.
///
/// With the `serializable` feature, trait objects are tagged with the
/// name of their variant so that [`load_model()`] gives back the right one.
#[cfg_attr(feature = "serializable", typetag::serde(tag = "model"))]
pub trait PersistentRegressor: Regressor {}

impl Regressor for GroupAverageRegressor {
    fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>> {
        GroupAverageRegressor::predict(self, features)
    }
}

#[cfg_attr(feature = "serializable", typetag::serde)]
impl PersistentRegressor for GroupAverageRegressor {}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureTable) -> Result<Array1<f64>> {
        LinearRegressor::predict(self, features)
    }
}

#[cfg_attr(feature = "serializable", typetag::serde)]
impl PersistentRegressor for LinearRegressor {}

/// Save any model in given json file, tagged with its variant name.
#[cfg(feature = "persistent")]
pub fn save_model<P: AsRef<Path>>(model: &dyn PersistentRegressor, path: P) -> Result<()> {
    let mut file = fs::File::create(path.as_ref())?;
    let bytes = serde_json::to_vec_pretty(model)?;
    file.write_all(&bytes)?;
    log::info!("Model {} saved in {}", model, path.as_ref().display());
    Ok(())
}

/// Load a model of any variant from given json file.
#[cfg(feature = "persistent")]
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn PersistentRegressor>> {
    let data = fs::read(path.as_ref())?;
    let model: Box<dyn PersistentRegressor> = serde_json::from_slice(&data)?;
    log::debug!("Model {} loaded from {}", model, path.as_ref().display());
    Ok(model)
}
