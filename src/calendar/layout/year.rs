use chrono::{Datelike as _, NaiveDate};

use crate::calendar::Partition;

pub const MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCount {
  pub month: u32,
  pub count: usize,
}

/// Number of events per month of the anchor year. Own and friends' events are counted together.
#[derive(Debug, PartialEq, Eq)]
pub struct YearLayout {
  pub year: i32,
  pub months: [MonthCount; MONTHS],
}

impl YearLayout {
  pub fn new(anchor: NaiveDate, events: &Partition) -> Self {
    let year = anchor.year();

    let months = std::array::from_fn(|idx| {
      let month = idx as u32 + 1;
      let prefix = format!("{year:04}-{month:02}-");

      MonthCount {
        month,
        count: events.all().filter(|event| event.date.starts_with(&prefix)).count(),
      }
    });

    Self { year, months }
  }

  pub fn total(&self) -> usize {
    self.months.iter().map(|month| month.count).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.total() == 0
  }
}
