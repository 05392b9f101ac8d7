//! GitHub contribution calendar, reduced to what the activity graph draws.

use serde::Serialize;
use time::Date;

use super::posts::format_iso_date;

/// Number of trailing days the graph keeps.
pub const GRAPH_DAYS: usize = 365;
pub const DAYS_PER_WEEK: usize = 7;

pub const EMPTY_COLOR: &str = "#ebedf0";
/// Legend swatches from least to most active, excluding the empty colour.
pub const LEGEND_COLORS: [&str; 4] = ["#9be9a8", "#40c463", "#30a14e", "#216e39"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: Date,
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: Date, count: u32) -> Self {
        Self { date, count }
    }

    pub fn color(&self) -> &'static str {
        intensity_color(self.count)
    }
}

pub fn intensity_color(count: u32) -> &'static str {
    match count {
        0 => EMPTY_COLOR,
        1..=3 => LEGEND_COLORS[0],
        4..=6 => LEGEND_COLORS[1],
        7..=9 => LEGEND_COLORS[2],
        _ => LEGEND_COLORS[3],
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionCalendar {
    days: Vec<ContributionDay>,
}

impl ContributionCalendar {
    pub fn new(days: Vec<ContributionDay>) -> Self {
        Self { days }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[ContributionDay] {
        &self.days
    }

    /// The trailing [`GRAPH_DAYS`] days, the same window the graph draws.
    fn window(&self) -> &[ContributionDay] {
        let start = self.days.len().saturating_sub(GRAPH_DAYS);
        &self.days[start..]
    }

    /// Contributions over the drawn window.
    pub fn total(&self) -> u64 {
        self.window().iter().map(|day| u64::from(day.count)).sum()
    }

    /// The last [`GRAPH_DAYS`] days split into columns of seven, oldest first.
    /// The final column may be shorter.
    pub fn weeks(&self) -> Vec<Vec<GraphCell>> {
        self.window()
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.iter().map(GraphCell::from).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphCell {
    pub date: String,
    pub count: u32,
    pub color: &'static str,
}

impl GraphCell {
    pub fn title(&self) -> String {
        format!("{}: {} contributions", self.date, self.count)
    }
}

impl From<&ContributionDay> for GraphCell {
    fn from(day: &ContributionDay) -> Self {
        Self {
            date: format_iso_date(day.date),
            count: day.count,
            color: day.color(),
        }
    }
}
