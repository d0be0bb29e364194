//! Text rendering of a model comparison.
use homeval_eval::Outcome;
use std::fmt;

/// Format `value` with two decimals and `,` as thousands separator,
/// e.g. `31234.567` gives `31,234.57`
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, dec_part) = formatted.split_at(formatted.len() - 3);
    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(dec_part);
    grouped
}

/// A comparison report, one block per evaluated model:
///
/// ```text
/// == baseline ==
/// GroupAverage(Neighborhood, 25 groups)
/// train rmse: 38,012.46
/// test rmse: 41,877.03
/// ```
///
/// A model whose evaluation failed shows the error message instead of its scores.
pub struct Report<'a> {
    metric: &'a str,
    outcomes: &'a [Outcome],
}

impl<'a> Report<'a> {
    /// Report of `outcomes`, all scored with the metric named `metric`
    pub fn new(metric: &'a str, outcomes: &'a [Outcome]) -> Self {
        Report { metric, outcomes }
    }

    /// Number of models whose evaluation failed
    pub fn n_failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} ==", outcome.name)?;
            writeln!(f, "{}", outcome.description)?;
            match &outcome.result {
                Ok(res) => {
                    writeln!(f, "train {}: {}", self.metric, format_thousands(res.train_error()))?;
                    writeln!(f, "test {}: {}", self.metric, format_thousands(res.test_error()))?;
                }
                Err(err) => writeln!(f, "error: {err}")?,
            }
        }
        Ok(())
    }
}
