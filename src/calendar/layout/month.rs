use chrono::{Days, NaiveDate};

use crate::calendar::date::{days_in_month, first_of_month, format_key, leading_blanks, WEEK_LENGTH};
use crate::calendar::{Event, Partition};

#[derive(Debug, PartialEq, Eq)]
pub struct MonthDay<'a> {
  pub day: u32,
  pub date: NaiveDate,
  pub key: String,
  pub public: Vec<&'a Event>,
  pub private: Vec<&'a Event>,
  /// Friends' events stay behind a single marker until it is clicked.
  pub has_friends: bool,
}

impl MonthDay<'_> {
  pub fn is_empty(&self) -> bool {
    self.public.is_empty() && self.private.is_empty() && !self.has_friends
  }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MonthLayout<'a> {
  pub first: NaiveDate,
  pub leading_blanks: usize,
  pub days: Vec<MonthDay<'a>>,
}

impl<'a> MonthLayout<'a> {
  pub fn new(anchor: NaiveDate, events: &'a Partition) -> Self {
    let first = first_of_month(anchor);

    let days = days_in_month(anchor)
      .into_iter()
      .map(|day| {
        let date = first + Days::new(u64::from(day - 1));
        let key = format_key(date);
        let groups = events.groups_on(&key);

        MonthDay {
          day,
          date,
          public: groups.public,
          private: groups.private,
          has_friends: events.has_friends_on(&key),
          key,
        }
      })
      .collect();

    Self {
      first,
      leading_blanks: leading_blanks(anchor),
      days,
    }
  }

  pub fn day(&self, date: NaiveDate) -> Option<&MonthDay<'a>> {
    self.days.iter().find(|day| day.date == date)
  }

  /// Grid rows of seven cells, padded with `None` before day 1 and after the last day.
  pub fn rows(&self) -> Vec<[Option<&MonthDay<'a>>; WEEK_LENGTH]> {
    let cells: Vec<Option<&MonthDay<'a>>> = std::iter::repeat(None)
      .take(self.leading_blanks)
      .chain(self.days.iter().map(Some))
      .collect();

    cells
      .chunks(WEEK_LENGTH)
      .map(|chunk| std::array::from_fn(|col| chunk.get(col).copied().flatten()))
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.days.iter().all(MonthDay::is_empty)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::calendar::Visibility;

  fn event(email: &str, date: &str, visibility: Visibility) -> Event {
    Event {
      email: email.into(),
      date: date.into(),
      visibility,
      ..Event::default()
    }
  }

  fn march() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
  }

  #[test]
  fn march_2024_grid() {
    let events = Partition::default();
    let layout = MonthLayout::new(march(), &events);
    let rows = layout.rows();

    assert_eq!(layout.leading_blanks, 4);
    assert_eq!(layout.days.len(), 31);
    assert_eq!(rows.len(), 5);
    assert!(rows[0][..4].iter().all(Option::is_none));
    assert_eq!(rows[0][4].map(|d| d.day), Some(1));
    assert_eq!(rows[4][6].map(|d| d.day), Some(31));
    assert!(layout.is_empty());
  }

  #[test]
  fn cell_counts_match_events_with_the_same_key() {
    let sample = vec![
      event("me", "2024-03-01", Visibility::Public),
      event("me", "2024-03-01", Visibility::Private),
      event("me", "2024-03-01", Visibility::Public),
      event("kim", "2024-03-01", Visibility::Public),
      event("me", "2024-03-31", Visibility::Private),
      event("me", "2024-04-01", Visibility::Public),
      event("kim", "2024-03-20", Visibility::Public),
    ];
    let events = Partition::split(sample.clone(), "me");
    let layout = MonthLayout::new(march(), &events);

    for day in &layout.days {
      let expected_public = sample
        .iter()
        .filter(|e| e.email == "me" && e.is_public() && format_key(day.date) == e.date)
        .count();
      let expected_private = sample
        .iter()
        .filter(|e| e.email == "me" && !e.is_public() && format_key(day.date) == e.date)
        .count();
      let expected_friends = sample.iter().any(|e| e.email != "me" && format_key(day.date) == e.date);

      assert_eq!(day.public.len(), expected_public, "public on {}", day.key);
      assert_eq!(day.private.len(), expected_private, "private on {}", day.key);
      assert_eq!(day.has_friends, expected_friends, "friends on {}", day.key);
    }

    assert!(!layout.is_empty());
    assert!(layout.day(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()).is_some_and(|d| d.has_friends));
  }

  #[test]
  fn month_starting_on_monday_has_no_blanks() {
    let events = Partition::default();
    let layout = MonthLayout::new(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(), &events);
    let rows = layout.rows();

    assert_eq!(layout.leading_blanks, 0);
    assert_eq!(rows[0][0].map(|d| d.day), Some(1));
    assert_eq!(rows.last().map(|row| row[1].map(|d| d.day)), Some(Some(30)));
    assert!(rows.last().is_some_and(|row| row[2].is_none()));
  }
}
