use chrono::NaiveDate;

use crate::calendar::date::{format_key, week, WEEK_LENGTH};
use crate::calendar::{Event, Partition};

#[derive(Debug, PartialEq, Eq)]
pub struct WeekDay<'a> {
  pub date: NaiveDate,
  pub key: String,
  pub mine: Vec<&'a Event>,
  pub friends: Vec<&'a Event>,
}

impl WeekDay<'_> {
  /// One indicator per event, no cap.
  pub fn indicators(&self) -> usize {
    self.mine.len() + self.friends.len()
  }
}

#[derive(Debug, PartialEq, Eq)]
pub struct WeekLayout<'a> {
  pub days: [WeekDay<'a>; WEEK_LENGTH],
}

impl<'a> WeekLayout<'a> {
  pub fn new(anchor: NaiveDate, events: &'a Partition) -> Self {
    let days = week(anchor).map(|date| {
      let key = format_key(date);

      WeekDay {
        date,
        mine: events.sorted_mine_on(&key),
        friends: events.sorted_friends_on(&key),
        key,
      }
    });

    Self { days }
  }

  pub fn start(&self) -> NaiveDate {
    self.days[0].date
  }

  pub fn end(&self) -> NaiveDate {
    self.days[WEEK_LENGTH - 1].date
  }

  pub fn is_empty(&self) -> bool {
    self.days.iter().all(|day| day.indicators() == 0)
  }
}
