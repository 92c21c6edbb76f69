use chrono::{Datelike as _, Days, Months, NaiveDate};

pub const WEEK_LENGTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  Day,
  Week,
  Month,
  Year,
}

/// `YYYY-MM-DD`, built from the calendar fields of the date.
/// This is the only key used to match events to grid cells.
pub fn format_key(date: NaiveDate) -> String {
  format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn parse_key(key: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
  date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
  start_of_week(date) + Days::new(WEEK_LENGTH as u64 - 1)
}

pub fn week(date: NaiveDate) -> [NaiveDate; WEEK_LENGTH] {
  let start = start_of_week(date);

  std::array::from_fn(|i| start + Days::new(i as u64))
}

/// Moves `date` by `amount` units. Month and year shifts clamp the day to the
/// length of the target month. Dates outside chrono's range are returned unchanged.
pub fn shift(date: NaiveDate, unit: Unit, amount: i32) -> NaiveDate {
  let magnitude = amount.unsigned_abs();
  let forward = amount >= 0;

  let shifted = match unit {
    Unit::Day => shift_days(date, u64::from(magnitude), forward),
    Unit::Week => shift_days(date, u64::from(magnitude) * WEEK_LENGTH as u64, forward),
    Unit::Month => shift_months(date, magnitude, forward),
    Unit::Year => magnitude
      .checked_mul(12)
      .and_then(|months| shift_months(date, months, forward)),
  };

  shifted.unwrap_or(date)
}

fn shift_days(date: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
  if forward {
    date.checked_add_days(Days::new(days))
  } else {
    date.checked_sub_days(Days::new(days))
  }
}

fn shift_months(date: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
  if forward {
    date.checked_add_months(Months::new(months))
  } else {
    date.checked_sub_months(Months::new(months))
  }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
  date - Days::new(u64::from(date.day0()))
}

pub fn month_len(date: NaiveDate) -> u32 {
  let first = first_of_month(date);

  first
    .checked_add_months(Months::new(1))
    .map_or(31, |next| u32::try_from((next - first).num_days()).unwrap_or(31))
}

pub fn days_in_month(date: NaiveDate) -> Vec<u32> {
  (1..=month_len(date)).collect()
}

/// Number of empty cells before day 1 in a Monday-first grid.
pub fn leading_blanks(date: NaiveDate) -> usize {
  first_of_month(date).weekday().num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn keys_are_zero_padded() {
    assert_eq!(format_key(date(2024, 3, 5)), "2024-03-05");
    assert_eq!(format_key(date(987, 12, 31)), "0987-12-31");
    assert_eq!(parse_key("2024-03-05"), Some(date(2024, 3, 5)));
    assert_eq!(parse_key("05.03.2024"), None);
  }

  #[test]
  fn start_of_week_is_monday_and_contains_date() {
    let mut day = date(2023, 12, 20);

    for _ in 0..400 {
      let start = start_of_week(day);

      assert_eq!(start.weekday(), Weekday::Mon);
      assert!(start <= day);
      assert!(day <= start + Days::new(6));
      assert_eq!(end_of_week(day), start + Days::new(6));

      day = day.succ_opt().unwrap();
    }
  }

  #[test]
  fn sunday_belongs_to_the_previous_monday() {
    assert_eq!(start_of_week(date(2024, 3, 17)), date(2024, 3, 11));
    assert_eq!(start_of_week(date(2024, 3, 18)), date(2024, 3, 18));
  }

  #[test]
  fn week_lists_seven_consecutive_days() {
    let days = week(date(2024, 2, 28));

    assert_eq!(days[0], date(2024, 2, 26));
    assert_eq!(days[3], date(2024, 2, 29));
    assert_eq!(days[6], date(2024, 3, 3));
  }

  #[test]
  fn shift_by_each_unit() {
    let anchor = date(2024, 3, 15);

    assert_eq!(shift(anchor, Unit::Day, 1), date(2024, 3, 16));
    assert_eq!(shift(anchor, Unit::Day, -15), date(2024, 2, 29));
    assert_eq!(shift(anchor, Unit::Week, 1), date(2024, 3, 22));
    assert_eq!(shift(anchor, Unit::Week, -2), date(2024, 3, 1));
    assert_eq!(shift(anchor, Unit::Month, 1), date(2024, 4, 15));
    assert_eq!(shift(anchor, Unit::Month, -3), date(2023, 12, 15));
    assert_eq!(shift(anchor, Unit::Year, 1), date(2025, 3, 15));
    assert_eq!(shift(anchor, Unit::Year, -1), date(2023, 3, 15));
  }

  #[test]
  fn month_shifts_clamp_to_month_length() {
    assert_eq!(shift(date(2024, 1, 31), Unit::Month, 1), date(2024, 2, 29));
    assert_eq!(shift(date(2024, 2, 29), Unit::Year, 1), date(2025, 2, 28));
  }

  #[test]
  fn shift_leaves_input_untouched() {
    let anchor = date(2024, 3, 15);
    let _ = shift(anchor, Unit::Month, 5);

    assert_eq!(anchor, date(2024, 3, 15));
  }

  #[test]
  fn out_of_range_shift_is_a_no_op() {
    assert_eq!(shift(NaiveDate::MAX, Unit::Day, 1), NaiveDate::MAX);
    assert_eq!(shift(NaiveDate::MIN, Unit::Year, -1), NaiveDate::MIN);
  }

  #[test]
  fn month_grid_for_march_2024() {
    let anchor = date(2024, 3, 15);

    assert_eq!(leading_blanks(anchor), 4);
    assert_eq!(days_in_month(anchor).len(), 31);
    assert_eq!(days_in_month(anchor).first(), Some(&1));
    assert_eq!(days_in_month(anchor).last(), Some(&31));
  }

  #[test]
  fn month_lengths() {
    assert_eq!(month_len(date(2024, 2, 10)), 29);
    assert_eq!(month_len(date(2023, 2, 10)), 28);
    assert_eq!(month_len(date(2024, 4, 30)), 30);
    assert_eq!(month_len(date(2024, 12, 1)), 31);
    assert_eq!(leading_blanks(date(2024, 4, 9)), 0);
    assert_eq!(leading_blanks(date(2024, 9, 9)), 6);
  }
}
