use crate::errors::{DataError, Result};
use linfa::dataset::Records;
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1};
use std::fmt;

/// A single table column.
///
/// Missing cells are stored as `NaN` for numeric columns and `None`
/// for categorical ones.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Floating point values
    Numeric(Array1<f64>),
    /// Free text category labels
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Number of cells
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells
    pub fn n_missing(&self) -> usize {
        match self {
            Column::Numeric(values) => values.iter().filter(|v| v.is_nan()).count(),
            Column::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Type name used in messages and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Categorical(_) => "categorical",
        }
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(rows.iter().map(|&i| values[i]).collect()),
            Column::Categorical(values) => {
                Column::Categorical(rows.iter().map(|&i| values[i].clone()).collect())
            }
        }
    }
}

impl From<Array1<f64>> for Column {
    fn from(values: Array1<f64>) -> Self {
        Column::Numeric(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(Array1::from(values))
    }
}

impl From<Vec<Option<String>>> for Column {
    fn from(values: Vec<Option<String>>) -> Self {
        Column::Categorical(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Categorical(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(values: Vec<Option<&str>>) -> Self {
        Column::Categorical(values.into_iter().map(|v| v.map(str::to_string)).collect())
    }
}

/// A features table: named columns of equal length, rows indexed
/// consistently with the label vector they come with.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    names: Vec<String>,
    columns: Vec<Column>,
    nrows: usize,
}

impl FeatureTable {
    /// Build a table from `(name, column)` pairs.
    ///
    /// Fails when two columns share a name or when column lengths differ.
    ///
    /// ```
    /// use homeval_data::FeatureTable;
    ///
    /// let table = FeatureTable::new(vec![
    ///     ("Neighborhood", vec!["NAmes", "OldTown"].into()),
    ///     ("LotArea", vec![8450., 9600.].into()),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.nrows(), 2);
    /// ```
    pub fn new<S: Into<String>>(columns: Vec<(S, Column)>) -> Result<Self> {
        let mut table = FeatureTable::empty();
        for (name, column) in columns {
            table.push(name, column)?;
        }
        Ok(table)
    }

    /// A table without column
    pub fn empty() -> Self {
        FeatureTable {
            names: Vec::new(),
            columns: Vec::new(),
            nrows: 0,
        }
    }

    /// Append a column to the right of the table
    pub fn push<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(DataError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.nrows {
            return Err(DataError::ShapeMismatch {
                expected: self.nrows,
                got: column.len(),
            });
        }
        self.nrows = column.len();
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Whether a column with that name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.position(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| DataError::SchemaMismatch {
                column: name.to_string(),
            })
    }

    /// Get a numeric column by name.
    ///
    /// A categorical column with that name is reported as a schema mismatch.
    pub fn numeric(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values.view()),
            Column::Categorical(_) => Err(DataError::SchemaMismatch {
                column: format!("{name} (numeric)"),
            }),
        }
    }

    /// Group keys of a column, one per row.
    ///
    /// Categorical values are returned as-is, numeric values are formatted
    /// with their shortest representation so that integer codes such as
    /// `20.0` become `"20"`. Missing cells give `None`.
    pub fn group_keys(&self, name: &str) -> Result<Vec<Option<String>>> {
        let keys = match self.column(name)? {
            Column::Categorical(values) => values.clone(),
            Column::Numeric(values) => values
                .iter()
                .map(|v| if v.is_nan() { None } else { Some(v.to_string()) })
                .collect(),
        };
        Ok(keys)
    }

    /// Rows subset taken in the given order.
    ///
    /// **Panics** if a row index is out of bounds.
    pub fn select(&self, rows: &[usize]) -> FeatureTable {
        FeatureTable {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(rows)).collect(),
            nrows: rows.len(),
        }
    }

    /// Remove the named numeric column and return it as labels along with
    /// the remaining features.
    pub fn split_target(mut self, name: &str) -> Result<(FeatureTable, Array1<f64>)> {
        let idx = self.position(name).ok_or_else(|| DataError::SchemaMismatch {
            column: name.to_string(),
        })?;
        let labels = match &self.columns[idx] {
            Column::Numeric(values) => {
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(DataError::InvalidTarget(format!(
                        "column `{name}` has missing or non finite values"
                    )));
                }
                values.to_owned()
            }
            Column::Categorical(_) => {
                return Err(DataError::InvalidTarget(format!(
                    "column `{name}` is not numeric"
                )))
            }
        };
        self.names.remove(idx);
        self.columns.remove(idx);
        Ok((self, labels))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        FeatureTable::empty()
    }
}

impl Records for FeatureTable {
    type Elem = f64;

    fn nsamples(&self) -> usize {
        self.nrows
    }

    fn nfeatures(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numerics = self
            .columns
            .iter()
            .filter(|c| matches!(c, Column::Numeric(_)))
            .count();
        write!(
            f,
            "FeatureTable({} rows, {} columns: {} numeric, {} categorical)",
            self.nrows,
            self.ncols(),
            numerics,
            self.ncols() - numerics
        )
    }
}

/// Features and labels of one dataset partition, aligned by row order.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    features: FeatureTable,
    labels: Array1<f64>,
}

impl Split {
    /// Constructor, fails when features and labels row counts differ
    pub fn new(
        features: FeatureTable,
        labels: ArrayBase<impl Data<Elem = f64>, Ix1>,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(DataError::ShapeMismatch {
                expected: features.nrows(),
                got: labels.len(),
            });
        }
        Ok(Split {
            features,
            labels: labels.to_owned(),
        })
    }

    /// Features table
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Labels vector
    pub fn labels(&self) -> &Array1<f64> {
        &self.labels
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the split has no row
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows subset taken in the given order
    pub fn select(&self, rows: &[usize]) -> Split {
        Split {
            features: self.features.select(rows),
            labels: rows.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Consume the split into its parts
    pub fn into_parts(self) -> (FeatureTable, Array1<f64>) {
        (self.features, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn houses() -> FeatureTable {
        FeatureTable::new(vec![
            ("Neighborhood", vec![Some("A"), None, Some("B")].into()),
            ("MSSubClass", vec![20., 60., f64::NAN].into()),
            ("SalePrice", vec![100., 200., 300.].into()),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = houses();
        assert_eq!(table.nrows(), 3);
        assert_eq!(table.ncols(), 3);
        assert_eq!(table.column_names(), &["Neighborhood", "MSSubClass", "SalePrice"]);
        assert_eq!(table.column("Neighborhood").unwrap().n_missing(), 1);
        assert_eq!(table.nsamples(), 3);
        assert_eq!(table.nfeatures(), 3);
    }

    #[test]
    fn test_table_rejects_bad_columns() {
        let err = FeatureTable::new(vec![
            ("a", vec![1., 2.].into()),
            ("b", vec![1.].into()),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { expected: 2, got: 1 }));

        let err = FeatureTable::new(vec![
            ("a", vec![1.].into()),
            ("a", vec![2.].into()),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_missing_column() {
        let table = houses();
        let err = table.column("GrLivArea").unwrap_err();
        assert!(matches!(err, DataError::SchemaMismatch { column } if column == "GrLivArea"));
        assert!(table.numeric("Neighborhood").is_err());
    }

    #[test]
    fn test_group_keys() {
        let table = houses();
        assert_eq!(
            table.group_keys("Neighborhood").unwrap(),
            vec![Some("A".to_string()), None, Some("B".to_string())]
        );
        assert_eq!(
            table.group_keys("MSSubClass").unwrap(),
            vec![Some("20".to_string()), Some("60".to_string()), None]
        );
    }

    #[test]
    fn test_split_target() {
        let (features, labels) = houses().split_target("SalePrice").unwrap();
        assert_eq!(features.ncols(), 2);
        assert!(!features.has_column("SalePrice"));
        assert_abs_diff_eq!(labels, array![100., 200., 300.]);

        let err = houses().split_target("MSSubClass").unwrap_err();
        assert!(matches!(err, DataError::InvalidTarget(_)));
        let err = houses().split_target("Neighborhood").unwrap_err();
        assert!(matches!(err, DataError::InvalidTarget(_)));
    }

    #[test]
    fn test_select_keeps_alignment() {
        let (features, labels) = houses().split_target("SalePrice").unwrap();
        let split = Split::new(features, labels).unwrap();
        let sub = split.select(&[2, 0]);
        assert_eq!(sub.len(), 2);
        assert_abs_diff_eq!(sub.labels(), &array![300., 100.]);
        assert_eq!(
            sub.features().group_keys("Neighborhood").unwrap(),
            vec![Some("B".to_string()), Some("A".to_string())]
        );
    }

    #[test]
    fn test_split_shape_mismatch() {
        let err = Split::new(houses(), array![1., 2.]).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { expected: 3, got: 2 }));
    }
}
