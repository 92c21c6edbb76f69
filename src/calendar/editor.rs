use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use url::Url;

use super::date::{format_key, parse_key};
use super::error::{Error, ErrorKind};
use super::event::{format_time, Event, Visibility, DEFAULT_END_TIME, DEFAULT_START_TIME};

pub const INVALID_URL: &str = "Invalid URL format. Please enter a valid NTNU timetable URL.";
const IMPORT_SCHEMES: [&str; 3] = ["ftp", "http", "https"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Create,
  Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Status,
  Description,
  StreetAddress,
  PostalNumber,
  StartTime,
  EndTime,
  Date,
  ImportUrl,
  ImportFile,
}

impl Field {
  pub const fn label(self) -> &'static str {
    match self {
      Self::Status => "Status/Title",
      Self::Description => "Description",
      Self::StreetAddress => "Street Address",
      Self::PostalNumber => "Postal Number",
      Self::StartTime => "Start Time",
      Self::EndTime => "End Time",
      Self::Date => "Date",
      Self::ImportUrl => "Import NTNU Timetable URL",
      Self::ImportFile => "Or Upload ICS File",
    }
  }
}

/// The timetable to import: a remote url, a local schedule file, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSource {
  pub url: Option<Url>,
  pub file: Option<PathBuf>,
}

/// Form state of the add/edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
  mode: Mode,
  pub status: String,
  pub description: String,
  pub street_address: String,
  pub postal_number: String,
  pub start_time: String,
  pub end_time: String,
  pub date: String,
  pub visibility: Visibility,
  pub import_url: String,
  pub import_file: String,
  pub error: Option<String>,
  busy: bool,
}

impl Editor {
  pub fn create(date: NaiveDate) -> Self {
    Self {
      mode: Mode::Create,
      status: String::new(),
      description: String::new(),
      street_address: String::new(),
      postal_number: String::new(),
      start_time: DEFAULT_START_TIME.to_owned(),
      end_time: DEFAULT_END_TIME.to_owned(),
      date: format_key(date),
      visibility: Visibility::Public,
      import_url: String::new(),
      import_file: String::new(),
      error: None,
      busy: false,
    }
  }

  /// Pre-populated from `event`. Events without an id can not be edited and open as a new draft.
  pub fn edit(event: &Event) -> Self {
    Self {
      mode: event.id().map_or(Mode::Create, |id| Mode::Edit(id.to_owned())),
      status: event.label().to_owned(),
      description: event.description.clone(),
      street_address: event.street_address.clone(),
      postal_number: event.postal_number.clone(),
      start_time: event.start().map_or_else(|| event.start_time.clone(), format_time),
      end_time: event.end().map_or_else(|| event.end_time.clone(), format_time),
      date: event.date.clone(),
      visibility: event.visibility,
      import_url: String::new(),
      import_file: String::new(),
      error: None,
      busy: false,
    }
  }

  pub const fn mode(&self) -> &Mode {
    &self.mode
  }

  pub const fn is_editing(&self) -> bool {
    matches!(self.mode, Mode::Edit(_))
  }

  pub const fn is_busy(&self) -> bool {
    self.busy
  }

  pub fn set_busy(&mut self, busy: bool) {
    self.busy = busy;
  }

  pub fn set(&mut self, field: Field, value: String) {
    let target = match field {
      Field::Status => &mut self.status,
      Field::Description => &mut self.description,
      Field::StreetAddress => &mut self.street_address,
      Field::PostalNumber => &mut self.postal_number,
      Field::StartTime => &mut self.start_time,
      Field::EndTime => &mut self.end_time,
      Field::Date => &mut self.date,
      Field::ImportUrl => &mut self.import_url,
      Field::ImportFile => &mut self.import_file,
    };

    *target = value;
  }

  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Status => &self.status,
      Field::Description => &self.description,
      Field::StreetAddress => &self.street_address,
      Field::PostalNumber => &self.postal_number,
      Field::StartTime => &self.start_time,
      Field::EndTime => &self.end_time,
      Field::Date => &self.date,
      Field::ImportUrl => &self.import_url,
      Field::ImportFile => &self.import_file,
    }
  }

  /// Validates the form and builds the record to send, owned by `email`.
  /// On failure the aggregated message is also kept in `error`.
  ///
  /// # Errors
  /// Returns a validation error naming every missing or malformed field.
  pub fn submit(&mut self, email: &str) -> Result<Event, Error> {
    match self.build(email) {
      Ok(event) => {
        self.error = None;
        Ok(event)
      }
      Err(error) => {
        self.error = Some(error.message.clone());
        Err(error)
      }
    }
  }

  fn build(&self, email: &str) -> Result<Event, Error> {
    let missing: Vec<&str> = [
      Field::Status,
      Field::Description,
      Field::StartTime,
      Field::EndTime,
      Field::Date,
    ]
    .into_iter()
    .filter(|field| self.get(*field).trim().is_empty())
    .map(Field::label)
    .collect();

    if !missing.is_empty() {
      return Err(Error::validation(format!(
        "Please fill in all fields: {}",
        missing.join(", ")
      )));
    }

    let date = parse_key(&self.date);
    let start = form_time(&self.start_time);
    let end = form_time(&self.end_time);

    let malformed: Vec<&str> = [
      (Field::Date, date.is_some()),
      (Field::StartTime, start.is_some()),
      (Field::EndTime, end.is_some()),
    ]
    .into_iter()
    .filter(|(_, valid)| !valid)
    .map(|(field, _)| field.label())
    .collect();

    let (Some(date), Some(start), Some(end)) = (date, start, end) else {
      return Err(Error::validation(format!("Please correct: {}", malformed.join(", "))));
    };

    Ok(Event {
      event_id: match &self.mode {
        Mode::Edit(id) => Some(id.clone()),
        Mode::Create => None,
      },
      email: email.to_owned(),
      date: format_key(date),
      start_time: start,
      end_time: end,
      status: self.status.trim().to_owned(),
      title: String::new(),
      description: self.description.trim().to_owned(),
      street_address: self.street_address.trim().to_owned(),
      postal_number: self.postal_number.trim().to_owned(),
      visibility: self.visibility,
    })
  }

  /// The import fields as a request source. Single-event validation does not apply here.
  ///
  /// # Errors
  /// Returns an import format error for a malformed url and a validation error if both fields are empty.
  pub fn import_source(&mut self) -> Result<ImportSource, Error> {
    let result = import_source(&self.import_url, &self.import_file);

    self.error = result.as_ref().err().map(|error| error.message.clone());

    result
  }
}

/// Form times are `HH:MM`; seconds are accepted and dropped.
fn form_time(value: &str) -> Option<String> {
  let value = value.trim();

  NaiveTime::parse_from_str(value, "%H:%M")
    .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
    .ok()
    .map(format_time)
}

/// # Errors
/// See [`Editor::import_source`].
pub fn import_source(url: &str, file: &str) -> Result<ImportSource, Error> {
  let url = url.trim();
  let file = file.trim();

  if url.is_empty() && file.is_empty() {
    return Err(Error::validation("Enter a timetable URL or choose an ICS file."));
  }

  let url = if url.is_empty() {
    None
  } else {
    Some(validate_import_url(url)?)
  };

  Ok(ImportSource {
    url,
    file: (!file.is_empty()).then(|| PathBuf::from(file)),
  })
}

/// Accepts `scheme://host...` with an ftp, http or https scheme and no spaces or quotes.
///
/// # Errors
/// Returns an import format error otherwise.
pub fn validate_import_url(value: &str) -> Result<Url, Error> {
  let invalid = || Error::new(ErrorKind::ImportFormat, INVALID_URL);

  if value.chars().any(|c| c.is_whitespace() || c == '"') {
    return Err(invalid());
  }

  let url = Url::parse(value).map_err(|_| invalid())?;

  let has_host = url.host_str().is_some_and(|host| !host.is_empty());
  if !IMPORT_SCHEMES.contains(&url.scheme()) || !has_host {
    return Err(invalid());
  }

  Ok(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  const ME: &str = "me@example.org";

  fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
  }

  fn filled() -> Editor {
    let mut editor = Editor::create(anchor());
    editor.set(Field::Status, " Lunch ".into());
    editor.set(Field::Description, "with Kim".into());
    editor
  }

  #[test]
  fn create_mode_defaults() {
    let editor = Editor::create(anchor());

    assert_eq!(editor.mode(), &Mode::Create);
    assert_eq!(editor.start_time, "12:00");
    assert_eq!(editor.end_time, "13:00");
    assert_eq!(editor.visibility, Visibility::Public);
    assert_eq!(editor.date, "2024-03-15");
    assert!(!editor.is_busy());
  }

  #[test]
  fn empty_description_is_rejected() {
    let mut editor = filled();
    editor.set(Field::Description, "   ".into());

    let error = editor.submit(ME).unwrap_err();

    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(error.message.contains("Description"));
    assert_eq!(editor.error.as_deref(), Some(error.message.as_str()));
  }

  #[test]
  fn all_missing_fields_are_reported_at_once() {
    let mut editor = Editor::create(anchor());
    editor.set(Field::StartTime, String::new());

    let error = editor.submit(ME).unwrap_err();

    assert_eq!(
      error.message,
      "Please fill in all fields: Status/Title, Description, Start Time"
    );
  }

  #[test]
  fn malformed_date_and_time_are_rejected() {
    let mut editor = filled();
    editor.set(Field::Date, "15.03.2024".into());
    editor.set(Field::EndTime, "1pm".into());

    let error = editor.submit(ME).unwrap_err();

    assert_eq!(error.message, "Please correct: Date, End Time");
  }

  #[test]
  fn create_builds_a_normalized_record_without_id() {
    let mut editor = filled();
    editor.set(Field::StartTime, "09:05:00".into());
    editor.visibility = Visibility::Private;

    let event = editor.submit(ME).unwrap();

    assert_eq!(event.event_id, None);
    assert_eq!(event.email, ME);
    assert_eq!(event.status, "Lunch");
    assert_eq!(event.start_time, "09:05");
    assert_eq!(event.end_time, "13:00");
    assert_eq!(event.date, "2024-03-15");
    assert_eq!(event.visibility, Visibility::Private);
    assert_eq!(editor.error, None);
  }

  #[test]
  fn edit_keeps_the_event_id() {
    let existing = Event {
      event_id: Some("42".into()),
      email: ME.into(),
      date: "2024-03-15".into(),
      start_time: "2024-03-15T08:15:00Z".into(),
      end_time: "10:00".into(),
      title: "Lecture".into(),
      description: "Room A".into(),
      visibility: Visibility::Private,
      ..Event::default()
    };

    let mut editor = Editor::edit(&existing);
    assert!(editor.is_editing());
    assert_eq!(editor.status, "Lecture");
    assert_eq!(editor.start_time, "08:15");

    editor.set(Field::Description, "Room B".into());
    let event = editor.submit(ME).unwrap();

    assert_eq!(event.id(), Some("42"));
    assert_eq!(event.description, "Room B");
    assert_eq!(event.status, "Lecture");
  }

  #[test]
  fn import_needs_a_url_or_a_file() {
    let mut editor = filled();

    let error = editor.import_source().unwrap_err();

    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(editor.error.is_some());
  }

  #[test]
  fn import_urls_are_checked() {
    for bad in ["tp.ntnu.no/ical", "mailto:me@example.org", "https://tp.ntnu.no/a b", "file:///etc/passwd", "https://\"x\""] {
      let error = validate_import_url(bad).unwrap_err();

      assert_eq!(error.kind, ErrorKind::ImportFormat, "{bad}");
      assert_eq!(error.message, INVALID_URL);
    }

    for good in ["https://tp.ntnu.no/timeplan/ical/?p=1", "http://localhost:8080/x.ics", "ftp://files.example.org/s.ics"] {
      assert!(validate_import_url(good).is_ok(), "{good}");
    }
  }

  #[test]
  fn import_source_from_file_only() {
    let mut editor = filled();
    editor.set(Field::ImportFile, " /tmp/schedule.ics ".into());

    let source = editor.import_source().unwrap();

    assert_eq!(source.url, None);
    assert_eq!(source.file, Some(PathBuf::from("/tmp/schedule.ics")));
    assert_eq!(editor.error, None);
  }
}
