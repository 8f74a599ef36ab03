//! Fitted-model inputs for the model plots.
//!
//! The charts never fit anything. A GAM or a linear regression is handed in
//! through [`AdditiveModel`] or [`LinearModel`], bundled with its predictions
//! in a [`ModelDict`].
use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::stats::r2_per_output;

/// Which split of the data a chart illustrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    #[default]
    Train,
    Test,
}

impl Dataset {
    /// Upper-case label used in prediction titles.
    pub fn title_label(&self) -> &'static str {
        match self {
            Dataset::Train => "TRAINING",
            Dataset::Test => "TEST",
        }
    }

    /// Label used in "Illustrated with ... observations".
    pub fn observation_label(&self) -> &'static str {
        match self {
            Dataset::Train => "training",
            Dataset::Test => "TEST",
        }
    }
}

impl FromStr for Dataset {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "train" => Ok(Dataset::Train),
            "test" => Ok(Dataset::Test),
            _ => Err(VizError::InvalidArgument(format!(
                "Unknown dataset: {}. Expected 'train' or 'test'",
                s
            ))),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dataset::Train => write!(f, "train"),
            Dataset::Test => write!(f, "test"),
        }
    }
}

/// A value held once for the training split and once for the test split.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    pub train: T,
    pub test: T,
}

impl<T> Split<T> {
    pub fn new(train: T, test: T) -> Self {
        Self { train, test }
    }

    pub fn get(&self, dataset: Dataset) -> &T {
        match dataset {
            Dataset::Train => &self.train,
            Dataset::Test => &self.test,
        }
    }
}

/// Fitted models for each output variable together with their predictions,
/// true values and R² scores.
#[derive(Debug, Clone)]
pub struct ModelDict<M> {
    pub description: String,
    pub y_variables: Vec<String>,
    pub models: Vec<M>,
    pub predictions: Split<Array2<f64>>,
    pub y_values: Split<Array2<f64>>,
    pub score: Split<Vec<f64>>,
}

impl<M> ModelDict<M> {
    /// Bundle models with their outputs, scoring each output column with R².
    pub fn new(
        description: impl Into<String>,
        y_variables: Vec<String>,
        models: Vec<M>,
        y_values: Split<Array2<f64>>,
        predictions: Split<Array2<f64>>,
    ) -> Result<Self> {
        for dataset in [Dataset::Train, Dataset::Test] {
            let (t, p) = (y_values.get(dataset), predictions.get(dataset));
            if t.dim() != p.dim() {
                return Err(VizError::shape(t.dim(), p.dim()));
            }
            if t.ncols() != y_variables.len() {
                return Err(VizError::WrongColumnCount {
                    expected: y_variables.len(),
                    found: t.ncols(),
                });
            }
        }
        let score = Split::new(
            r2_per_output(y_values.train.view(), predictions.train.view())?,
            r2_per_output(y_values.test.view(), predictions.test.view())?,
        );
        Ok(Self {
            description: description.into(),
            y_variables,
            models,
            predictions,
            y_values,
            score,
        })
    }

    /// Models without stored predictions, enough for coefficient and
    /// partial-dependence plots.
    pub fn from_models(
        description: impl Into<String>,
        y_variables: Vec<String>,
        models: Vec<M>,
    ) -> Self {
        let n_outputs = y_variables.len();
        let empty = || Array2::<f64>::zeros((0, n_outputs));
        Self {
            description: description.into(),
            predictions: Split::new(empty(), empty()),
            y_values: Split::new(empty(), empty()),
            score: Split::new(Vec::new(), Vec::new()),
            y_variables,
            models,
        }
    }

    /// Output variable names with underscores shown as spaces.
    pub fn display_y_variables(&self) -> Vec<String> {
        self.y_variables.iter().map(|v| v.replace('_', " ")).collect()
    }
}

/// One term of an additive model. Intercept terms have no feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub feature: Option<usize>,
}

impl Term {
    pub fn feature(feature: usize) -> Self {
        Self {
            feature: Some(feature),
        }
    }

    pub fn intercept() -> Self {
        Self { feature: None }
    }

    pub fn is_intercept(&self) -> bool {
        self.feature.is_none()
    }
}

/// A fitted generalized additive model.
pub trait AdditiveModel {
    fn terms(&self) -> Vec<Term>;

    /// Grid of predictor rows spanning the range of the term's feature.
    fn generate_x_grid(&self, term: usize) -> Result<Array2<f64>>;

    /// Partial dependence of `term` at each row of `x`, with an (n, 2)
    /// array of lower and upper confidence bounds at the given width.
    fn partial_dependence(
        &self,
        term: usize,
        x: ArrayView2<f64>,
        width: f64,
    ) -> Result<(Array1<f64>, Array2<f64>)>;

    fn deviance_residuals(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// A fitted linear regression exposing its estimates and 95% intervals.
pub trait LinearModel {
    /// `(predictor, estimate)` in model order.
    fn params(&self) -> Vec<(String, f64)>;

    /// `(lower, upper)` 95% confidence bounds in the same order as `params`.
    fn conf_int(&self) -> Vec<(f64, f64)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Coefficient table of an already-fitted linear model for one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSummary {
    pub y_variable: String,
    pub params: Vec<Coefficient>,
}

impl LinearModel for CoefficientSummary {
    fn params(&self) -> Vec<(String, f64)> {
        self.params
            .iter()
            .map(|c| (c.name.clone(), c.estimate))
            .collect()
    }

    fn conf_int(&self) -> Vec<(f64, f64)> {
        self.params.iter().map(|c| (c.ci_lower, c.ci_upper)).collect()
    }
}
