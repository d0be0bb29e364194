//! CSV loading of features tables.
//!
//! Column types are inferred: a column whose non missing cells all parse as
//! floating point numbers is numeric, any other column is categorical.
use crate::errors::Result;
use crate::table::{Column, FeatureTable, Split};
use log::{debug, info};
use ndarray::Array1;
use std::fs::File;
use std::io;
use std::path::Path;

/// Default tokens read as missing cells
pub const DEFAULT_MISSING_TOKENS: [&str; 2] = ["", "NA"];

/// Options driving CSV parsing and column type inference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    pub(crate) delimiter: u8,
    pub(crate) missing_tokens: Vec<String>,
    pub(crate) categorical_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            missing_tokens: DEFAULT_MISSING_TOKENS.iter().map(|t| t.to_string()).collect(),
            categorical_columns: Vec::new(),
        }
    }
}

impl CsvOptions {
    /// Set field delimiter
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set tokens read as missing cells (after trimming)
    pub fn missing_tokens<S: AsRef<str>>(mut self, tokens: &[S]) -> Self {
        self.missing_tokens = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Force columns to be read as categorical even if their values are numbers
    /// (e.g. integer coded classes).
    pub fn categorical_columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.categorical_columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    fn is_missing(&self, field: &str) -> bool {
        self.missing_tokens.iter().any(|t| t == field)
    }
}

/// Read a headed CSV file into a [`FeatureTable`]
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<FeatureTable> {
    let file = File::open(path.as_ref())?;
    let table = parse_csv(file, options)?;
    info!("Loaded {} from {}", table, path.as_ref().display());
    Ok(table)
}

/// Read a headed CSV file and take the `target` column out as labels
pub fn load_split<P: AsRef<Path>>(path: P, target: &str, options: &CsvOptions) -> Result<Split> {
    let (features, labels) = read_csv(path, options)?.split_target(target)?;
    Split::new(features, labels)
}

/// Parse headed CSV content from any reader
pub fn parse_csv<R: io::Read>(reader: R, options: &CsvOptions) -> Result<FeatureTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (values, field) in cells.iter_mut().zip(record.iter()) {
            values.push(if options.is_missing(field) {
                None
            } else {
                Some(field.to_string())
            });
        }
    }

    let mut table = FeatureTable::empty();
    for (name, values) in headers.iter().zip(cells) {
        let forced = options.categorical_columns.iter().any(|c| c == name);
        let column = if forced {
            Column::Categorical(values)
        } else {
            infer_column(values)
        };
        debug!("Column {} read as {}", name, column.kind());
        table.push(name, column)?;
    }
    Ok(table)
}

fn infer_column(values: Vec<Option<String>>) -> Column {
    let parsed: Option<Array1<f64>> = values
        .iter()
        .map(|v| match v {
            Some(s) => s.parse::<f64>().ok(),
            None => Some(f64::NAN),
        })
        .collect();
    match parsed {
        Some(numbers) => Column::Numeric(numbers),
        None => Column::Categorical(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    const HOUSES: &str = "\
Id,MSSubClass,Neighborhood,LotFrontage,SalePrice
1,60,CollgCr,65,208500
2,20,Veenker,80,181500
3,60,CollgCr,NA,223500
4,70,,60,140000
";

    #[test]
    fn test_parse_csv_inference() {
        let table = parse_csv(HOUSES.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(table.nrows(), 4);
        assert_eq!(table.ncols(), 5);
        assert_eq!(table.column("Neighborhood").unwrap().kind(), "categorical");
        assert_eq!(table.column("Neighborhood").unwrap().n_missing(), 1);
        assert_eq!(table.column("LotFrontage").unwrap().kind(), "numeric");
        assert_eq!(table.column("LotFrontage").unwrap().n_missing(), 1);
        let expected = array![208500., 181500., 223500., 140000.];
        assert_abs_diff_eq!(table.numeric("SalePrice").unwrap(), expected.view());
    }

    #[test]
    fn test_parse_csv_forced_categorical() {
        let options = CsvOptions::default().categorical_columns(&["MSSubClass"]);
        let table = parse_csv(HOUSES.as_bytes(), &options).unwrap();
        assert_eq!(table.column("MSSubClass").unwrap().kind(), "categorical");
        assert_eq!(
            table.group_keys("MSSubClass").unwrap()[0],
            Some("60".to_string())
        );
    }

    #[test]
    fn test_parse_csv_custom_missing_tokens() {
        let options = CsvOptions::default().missing_tokens(&[""]);
        let table = parse_csv(HOUSES.as_bytes(), &options).unwrap();
        // "NA" is now a regular value so the column is no longer numeric
        assert_eq!(table.column("LotFrontage").unwrap().kind(), "categorical");
    }

    #[test]
    fn test_parse_csv_semicolon() {
        let data = "Neighborhood;SalePrice\nA;100\nB;300\n";
        let options = CsvOptions::default().delimiter(b';');
        let table = parse_csv(data.as_bytes(), &options).unwrap();
        let (features, labels) = table.split_target("SalePrice").unwrap();
        assert_eq!(features.column_names(), &["Neighborhood"]);
        assert_abs_diff_eq!(labels, array![100., 300.]);
    }

    #[test]
    fn test_parse_csv_ragged_rows() {
        let data = "a,b\n1,2\n3\n";
        assert!(parse_csv(data.as_bytes(), &CsvOptions::default()).is_err());
    }
}
