use crate::errors::{ModelError, Result};
use linfa::ParamGuard;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Group column used when none is given
pub const DEFAULT_GROUP_COLUMN: &str = "Neighborhood";

/// A set of validated group average parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct GroupAverageValidParams {
    /// Categorical column partitioning rows before averaging
    pub(crate) group_column: String,
}

impl Default for GroupAverageValidParams {
    fn default() -> GroupAverageValidParams {
        GroupAverageValidParams {
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
        }
    }
}

impl GroupAverageValidParams {
    /// Get group column name
    pub fn group_column(&self) -> &str {
        &self.group_column
    }
}

#[derive(Clone, Debug, Default)]
/// The set of hyperparameters that can be specified for fitting a
/// [group average regressor](crate::GroupAverageRegressor).
pub struct GroupAverageParams(GroupAverageValidParams);

impl GroupAverageParams {
    /// A constructor for parameters given the group column name
    pub fn new<S: Into<String>>(group_column: S) -> GroupAverageParams {
        Self(GroupAverageValidParams {
            group_column: group_column.into(),
        })
    }

    /// Set group column.
    pub fn group_column<S: Into<String>>(mut self, group_column: S) -> Self {
        self.0.group_column = group_column.into();
        self
    }
}

impl From<GroupAverageValidParams> for GroupAverageParams {
    fn from(valid: GroupAverageValidParams) -> Self {
        GroupAverageParams(valid)
    }
}

impl ParamGuard for GroupAverageParams {
    type Checked = GroupAverageValidParams;
    type Error = ModelError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.group_column.trim().is_empty() {
            return Err(ModelError::InvalidValueError(
                "`group_column` cannot be empty!".to_string(),
            ));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GroupAverageParams::default().check().unwrap();
        assert_eq!(params.group_column(), DEFAULT_GROUP_COLUMN);
    }

    #[test]
    fn test_empty_group_column() {
        let err = GroupAverageParams::new("  ").check().unwrap_err();
        assert!(matches!(err, ModelError::InvalidValueError(_)));
        let params = GroupAverageParams::new("").group_column("MSZoning");
        assert_eq!(params.check_ref().unwrap().group_column(), "MSZoning");
    }
}
