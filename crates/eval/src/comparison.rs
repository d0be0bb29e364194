use crate::errors::Result;
use crate::evaluation::{evaluate_splits, EvaluationResult};
use crate::metrics::Metric;

use homeval_data::Split;
use homeval_models::Regressor;
use log::{info, warn};

/// A named model taking part in a [`Comparison`]
pub struct Candidate {
    name: String,
    model: Box<dyn Regressor>,
}

impl Candidate {
    /// Name given to the model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model itself
    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }
}

/// The evaluation outcome of one [`Candidate`]
#[derive(Debug)]
pub struct Outcome {
    /// Name of the evaluated model
    pub name: String,
    /// Model description as given by its `Display` implementation
    pub description: String,
    /// Evaluation result or the error which aborted it
    pub result: Result<EvaluationResult>,
}

impl Outcome {
    /// Whether the evaluation succeeded
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// An ordered set of models evaluated against the same splits and metric.
///
/// Each model is evaluated independently: a failing model is reported as such
/// in its [`Outcome`] and does not prevent the evaluation of the others.
#[derive(Default)]
pub struct Comparison {
    candidates: Vec<Candidate>,
}

impl Comparison {
    /// An empty comparison
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model under the given name
    pub fn with_model<S: Into<String>>(mut self, name: S, model: Box<dyn Regressor>) -> Self {
        self.push(name, model);
        self
    }

    /// Append a model under the given name
    pub fn push<S: Into<String>>(&mut self, name: S, model: Box<dyn Regressor>) {
        self.candidates.push(Candidate {
            name: name.into(),
            model,
        });
    }

    /// Models in insertion order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of models
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no model was added
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Evaluate every model with `metric` on `train` and `test`, in insertion order
    pub fn run<S: Metric + ?Sized>(&self, metric: &S, train: &Split, test: &Split) -> Vec<Outcome> {
        self.candidates
            .iter()
            .map(|candidate| {
                let result = evaluate_splits(candidate.model(), metric, train, test);
                match &result {
                    Ok(res) => info!("{} ({}): {}", candidate.name, candidate.model, res),
                    Err(err) => warn!(
                        "{} ({}) evaluation failed: {}",
                        candidate.name, candidate.model, err
                    ),
                }
                Outcome {
                    name: candidate.name.clone(),
                    description: candidate.model.to_string(),
                    result,
                }
            })
            .collect()
    }
}
