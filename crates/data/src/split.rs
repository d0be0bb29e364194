use crate::errors::{DataError, Result};
use crate::table::Split;
use log::debug;
use ndarray_rand::rand::{seq::SliceRandom, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Shuffle the rows of `data` with a generator seeded by `seed` and cut them
/// into a train and a test split.
///
/// The train split gets `round(n * (1 - test_ratio))` rows. The same seed
/// always produces the same partition.
///
/// ```
/// use homeval_data::{train_test_split, FeatureTable, Split};
/// use ndarray::array;
///
/// let table = FeatureTable::new(vec![("Neighborhood", vec!["A", "B", "A", "C"].into())]).unwrap();
/// let data = Split::new(table, array![100., 300., 200., 250.]).unwrap();
/// let (train, test) = train_test_split(&data, 0.25, 42).unwrap();
/// assert_eq!((train.len(), test.len()), (3, 1));
/// ```
pub fn train_test_split(data: &Split, test_ratio: f64, seed: u64) -> Result<(Split, Split)> {
    if !(0.0..=1.0).contains(&test_ratio) {
        return Err(DataError::InvalidValue(format!(
            "test ratio should be in [0, 1], got {test_ratio}"
        )));
    }
    let n = data.len();
    let mut rows: Vec<usize> = (0..n).collect();
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let n_train = (n as f64 * (1. - test_ratio)).round() as usize;
    let (train_rows, test_rows) = rows.split_at(n_train.min(n));
    debug!(
        "Split {} rows into {} train / {} test (seed {})",
        n,
        train_rows.len(),
        test_rows.len(),
        seed
    );
    Ok((data.select(train_rows), data.select(test_rows)))
}
