use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;

use super::date::Unit;
use super::partition::Partition;

mod day;
mod month;
mod week;
mod year;

pub use day::DayLayout;
pub use month::{MonthDay, MonthLayout};
pub use week::{WeekDay, WeekLayout};
pub use year::{MonthCount, YearLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
  Day,
  Week,
  #[default]
  Month,
  Year,
}

impl ViewMode {
  pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

  /// The step used when navigating in this view.
  pub const fn unit(self) -> Unit {
    match self {
      Self::Day => Unit::Day,
      Self::Week => Unit::Week,
      Self::Month => Unit::Month,
      Self::Year => Unit::Year,
    }
  }
}

impl Display for ViewMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Self::Day => "Day",
      Self::Week => "Week",
      Self::Month => "Month",
      Self::Year => "Year",
    })
  }
}

impl FromStr for ViewMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "day" => Ok(Self::Day),
      "week" => Ok(Self::Week),
      "month" => Ok(Self::Month),
      "year" => Ok(Self::Year),
      other => Err(format!("Unknown view '{other}'")),
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Layout<'a> {
  Day(DayLayout<'a>),
  Week(WeekLayout<'a>),
  Month(MonthLayout<'a>),
  Year(YearLayout),
}

impl Layout<'_> {
  pub fn is_empty(&self) -> bool {
    match self {
      Self::Day(layout) => layout.is_empty(),
      Self::Week(layout) => layout.is_empty(),
      Self::Month(layout) => layout.is_empty(),
      Self::Year(layout) => layout.is_empty(),
    }
  }
}

/// Builds the layout of `view` around `anchor`.
pub fn render(view: ViewMode, anchor: NaiveDate, events: &Partition) -> Layout<'_> {
  match view {
    ViewMode::Day => Layout::Day(DayLayout::new(anchor, events)),
    ViewMode::Week => Layout::Week(WeekLayout::new(anchor, events)),
    ViewMode::Month => Layout::Month(MonthLayout::new(anchor, events)),
    ViewMode::Year => Layout::Year(YearLayout::new(anchor, events)),
  }
}
