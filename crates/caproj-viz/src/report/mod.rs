//! Multi-plot HTML reports.
mod page;

pub use page::{Report, ReportSection};
