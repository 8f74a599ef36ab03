use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use plotly::common::{DashType, Line, Marker, MarkerSymbol, Mode, TickMode};
use plotly::layout::{Axis, AxisType};
use plotly::{Plot, Scatter};

use crate::error::{Result, VizError};
use crate::plots::figure::{grid_axis, suptitle, title_margin, FigSize, Grid};
use crate::records::{ChangeRecord, ProjectRecord};
use crate::stats::{format_thousands, fractional_change, step_percent_change};

/// Longest project name shown in the figure title.
const MAX_NAME_CHARS: usize = 88;

/// Budget and duration history of one project, derived from its change records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTrend {
    pub project: ProjectRecord,
    pub dates: Vec<NaiveDateTime>,
    pub budget_forecast: Vec<f64>,
    /// Percent change contributed by each record's budget change.
    pub budget_pct_change: Vec<f64>,
    /// `Duration_Start` plus the running sum of schedule changes.
    pub duration: Vec<f64>,
    /// Percent change contributed by each record's schedule change.
    pub duration_pct_change: Vec<f64>,
    /// Fractional change from the original budget to the last forecast.
    pub total_budget_change: f64,
    /// Fractional change from the original duration to the last duration.
    pub total_schedule_change: f64,
}

impl ChangeTrend {
    /// Collect the records of `pid`, keeping only change years up to
    /// `interval` when it is given. An interval of 0 keeps every year.
    pub fn compute(
        trend_data: &[ChangeRecord],
        pid_data: &[ProjectRecord],
        pid: i64,
        interval: Option<i32>,
    ) -> Result<Self> {
        let project = pid_data
            .iter()
            .find(|p| p.pid == pid)
            .cloned()
            .ok_or(VizError::MissingProject(pid))?;

        let interval = interval.filter(|&year| year != 0);
        let changes: Vec<&ChangeRecord> = trend_data
            .iter()
            .filter(|r| r.pid == pid && interval.map_or(true, |max| r.change_year <= max))
            .collect();
        if changes.is_empty() {
            return Err(VizError::MissingProject(pid));
        }

        let mut duration = Vec::with_capacity(changes.len());
        let mut running = project.duration_start;
        for r in &changes {
            running += r.latest_schedule_changes;
            duration.push(running);
        }

        let budget_pct_change = changes
            .iter()
            .map(|r| {
                step_percent_change(
                    r.latest_budget_changes,
                    r.budget_forecast - r.latest_budget_changes,
                )
            })
            .collect();
        let duration_pct_change = changes
            .iter()
            .zip(&duration)
            .map(|(r, d)| {
                step_percent_change(r.latest_schedule_changes, d - r.latest_schedule_changes)
            })
            .collect();

        let last_budget = changes.last().map(|r| r.budget_forecast).unwrap_or(f64::NAN);
        let last_duration = duration.last().copied().unwrap_or(f64::NAN);

        Ok(Self {
            total_budget_change: fractional_change(project.budget_start, last_budget),
            total_schedule_change: fractional_change(project.duration_start, last_duration),
            dates: changes.iter().map(|r| r.date_reported_as_of).collect(),
            budget_forecast: changes.iter().map(|r| r.budget_forecast).collect(),
            budget_pct_change,
            duration,
            duration_pct_change,
            project,
        })
    }

    /// January 1st of every year from the first report to the last.
    pub fn year_ticks(&self) -> Vec<NaiveDateTime> {
        let (Some(first), Some(last)) = (self.dates.iter().min(), self.dates.iter().max()) else {
            return Vec::new();
        };
        (first.year()..=last.year())
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .filter_map(|d| d.and_hms_opt(0, 0, 0))
            .collect()
    }

    /// Date range shared by all four panels: from the first year tick to just
    /// past the last report.
    pub fn date_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = *self.year_ticks().first()?;
        let last = *self.dates.iter().max()?;
        let pad = ((last - start) / 50).max(Duration::days(1));
        Some((start, last + pad))
    }

    /// Multi-line figure title describing the project.
    pub fn title(&self) -> String {
        let p = &self.project;
        let name: String = p.project_name.chars().take(MAX_NAME_CHARS).collect();
        [
            format!("PID {}", p.pid),
            name,
            format!("Category: {}", p.category),
            format!("Borough: {}", p.borough),
            format!("Original Budget: ${:.2} million", p.budget_start / 1e6),
            format!(
                "Original Duration: {} days",
                format_thousands(p.duration_start.round() as i64)
            ),
        ]
        .join("<br>")
    }
}

fn epoch_millis(d: &NaiveDateTime) -> f64 {
    d.and_utc().timestamp_millis() as f64
}

/// Date axis ticked once per year at January 1st.
fn date_axis(trend: &ChangeTrend) -> Axis {
    let ticks = trend.year_ticks();
    let mut axis = grid_axis()
        .type_(AxisType::Date)
        .tick_mode(TickMode::Array)
        .tick_values(ticks.iter().map(epoch_millis).collect())
        .tick_text(ticks.iter().map(|d| d.format("%Y").to_string()).collect());
    if let Some((start, end)) = trend.date_span() {
        axis = axis.range(vec![epoch_millis(&start), epoch_millis(&end)]);
    }
    axis
}

fn trend_line(dates: &[String], values: Vec<f64>, cell_refs: (&str, &str)) -> Box<Scatter<String, f64>> {
    Scatter::new(dates.to_vec(), values)
        .mode(Mode::LinesMarkers)
        .line(Line::new().color("black"))
        .marker(Marker::new().color("black").symbol(MarkerSymbol::Circle))
        .show_legend(false)
        .x_axis(cell_refs.0)
        .y_axis(cell_refs.1)
}

fn reference_line(
    dates: &[String],
    value: f64,
    dash: DashType,
    color: &str,
    cell_refs: (&str, &str),
) -> Box<Scatter<String, f64>> {
    let ends = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => vec![first.clone(), last.clone()],
        _ => Vec::new(),
    };
    Scatter::new(ends, vec![value, value])
        .mode(Mode::Lines)
        .line(Line::new().color(color.to_string()).dash(dash))
        .show_legend(false)
        .x_axis(cell_refs.0)
        .y_axis(cell_refs.1)
}

/// Four panels tracing one project's budget and duration forecasts over its
/// change reports: totals on top, per-report percent changes below.
pub fn plot_change_trend(
    trend_data: &[ChangeRecord],
    pid_data: &[ProjectRecord],
    pid: i64,
    interval: Option<i32>,
) -> Result<Plot> {
    let trend = ChangeTrend::compute(trend_data, pid_data, pid, interval)?;
    log::debug!(
        "PID {}: {} change records, budget change {:.4}, schedule change {:.4}",
        pid,
        trend.dates.len(),
        trend.total_budget_change,
        trend.total_schedule_change
    );

    let dates: Vec<String> = trend
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .collect();
    let budget_start = trend.project.budget_start;
    let duration_start = trend.project.duration_start;

    // row-major: budget total, duration total, budget pct, duration pct
    let grid = Grid::new(2, 2)?.with_top_margin(0.1);
    let cells: Vec<_> = grid.cells().collect();
    let refs: Vec<(String, String)> = cells.iter().map(|c| (c.x_ref(), c.y_ref())).collect();
    let r = |i: usize| (refs[i].0.as_str(), refs[i].1.as_str());

    let mut plot = Plot::new();

    plot.add_trace(trend_line(
        &dates,
        trend.budget_forecast.iter().map(|b| b / 1e6).collect(),
        r(0),
    ));
    plot.add_trace(
        reference_line(&dates, budget_start / 1e6, DashType::Dot, "black", r(0))
            .name("Original forecasted")
            .show_legend(true),
    );

    plot.add_trace(trend_line(
        &dates,
        trend.duration.iter().map(|d| d / 1e3).collect(),
        r(1),
    ));
    plot.add_trace(reference_line(&dates, duration_start / 1e3, DashType::Dot, "black", r(1)));

    plot.add_trace(trend_line(&dates, trend.budget_pct_change.clone(), r(2)));
    plot.add_trace(reference_line(&dates, 0.0, DashType::Solid, "gray", r(2)));

    plot.add_trace(trend_line(&dates, trend.duration_pct_change.clone(), r(3)));
    plot.add_trace(reference_line(&dates, 0.0, DashType::Solid, "gray", r(3)));

    let panel_titles = [
        format!(
            "Total budget forecast<br>({:.2}% total change)",
            trend.total_budget_change * 100.0
        ),
        format!(
            "Total forecasted project duration<br>({:.2}% total change)",
            trend.total_schedule_change * 100.0
        ),
        "Percentage budget change".to_string(),
        "Percentage duration change".to_string(),
    ];
    let y_titles = ["USD (millions)", "days (thousands)", "percent change", "percent change"];

    let title = trend.title();
    let mut annotations = vec![suptitle(&title, 1.0, 16)];
    // six title lines sit above a 12x6 panel area
    let mut layout = FigSize::new(12.0, 9.0).layout().margin(title_margin(6));
    for (cell, (panel_title, y_title)) in cells.iter().zip(panel_titles.iter().zip(y_titles)) {
        annotations.push(cell.title(panel_title, 14));
        // identical ticks and range keep the four date axes aligned
        let mut x_axis = date_axis(&trend);
        if cell.row == 1 {
            x_axis = x_axis.title("project change date");
        }
        layout = cell.apply(layout, x_axis, grid_axis().title(y_title));
    }

    plot.set_layout(layout.annotations(annotations));
    Ok(plot)
}
