use std::error::Error;
use std::fmt;

/// Errors raised while preparing chart data.
#[derive(Debug)]
pub enum VizError {
    /// Two inputs that must line up have different lengths or shapes.
    ShapeMismatch { expected: String, found: String },
    /// A 2D input does not have the number of columns the chart needs.
    WrongColumnCount { expected: usize, found: usize },
    UnknownColumn(String),
    EmptyInput(&'static str),
    MissingProject(i64),
    InvalidArgument(String),
    Image(image::ImageError),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl VizError {
    pub(crate) fn shape(expected: impl fmt::Debug, found: impl fmt::Debug) -> Self {
        VizError::ShapeMismatch {
            expected: format!("{:?}", expected),
            found: format!("{:?}", found),
        }
    }
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VizError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {}, found {}", expected, found)
            }
            VizError::WrongColumnCount { expected, found } => write!(
                f,
                "Expected data with {} columns, found {} columns",
                expected, found
            ),
            VizError::UnknownColumn(name) => write!(f, "Unknown column: {}", name),
            VizError::EmptyInput(what) => write!(f, "No data to plot: {} is empty", what),
            VizError::MissingProject(pid) => write!(f, "No records found for PID {}", pid),
            VizError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            VizError::Image(e) => write!(f, "Failed to load image: {}", e),
            VizError::Io(e) => write!(f, "I/O error: {}", e),
            VizError::Csv(e) => write!(f, "CSV error: {}", e),
            VizError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for VizError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VizError::Image(e) => Some(e),
            VizError::Io(e) => Some(e),
            VizError::Csv(e) => Some(e),
            VizError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for VizError {
    fn from(e: image::ImageError) -> Self {
        VizError::Image(e)
    }
}

impl From<std::io::Error> for VizError {
    fn from(e: std::io::Error) -> Self {
        VizError::Io(e)
    }
}

impl From<csv::Error> for VizError {
    fn from(e: csv::Error) -> Self {
        VizError::Csv(e)
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        VizError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, VizError>;
