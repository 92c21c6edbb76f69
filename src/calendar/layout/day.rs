use chrono::NaiveDate;

use crate::calendar::date::format_key;
use crate::calendar::{Event, Partition};

#[derive(Debug, PartialEq, Eq)]
pub struct DayLayout<'a> {
  pub date: NaiveDate,
  pub key: String,
  pub mine: Vec<&'a Event>,
  pub friends: Vec<&'a Event>,
}

impl<'a> DayLayout<'a> {
  pub fn new(anchor: NaiveDate, events: &'a Partition) -> Self {
    let key = format_key(anchor);

    Self {
      date: anchor,
      mine: events.sorted_mine_on(&key),
      friends: events.sorted_friends_on(&key),
      key,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.mine.is_empty() && self.friends.is_empty()
  }
}
