use std::path::Path;

use ureq::Agent;
use url::Url;

use super::editor::ImportSource;
use super::error::{Error, ErrorKind};
use super::event::Event;

/// The account the session belongs to, as reported by `/api/me`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
  pub email: String,
  #[serde(default)]
  pub username: String,
}

/// Everything the calendar needs from the events backend.
pub trait Store {
  /// # Errors
  /// Returns an error if the session is not valid or the request fails.
  fn me(&self) -> Result<User, Error>;

  /// All events visible to `email`: own events and friends' public events.
  ///
  /// # Errors
  /// Returns an error if the request or the decoding fails.
  fn events(&self, email: &str) -> Result<Vec<Event>, Error>;

  /// Creates `event` and returns the server assigned id.
  ///
  /// # Errors
  /// Returns an error if the request fails or no id is returned.
  fn create(&self, event: &Event) -> Result<String, Error>;

  /// # Errors
  /// Returns an error if the request fails.
  fn update(&self, event_id: &str, event: &Event) -> Result<(), Error>;

  /// # Errors
  /// Returns an error if the request fails.
  fn delete(&self, event_id: &str) -> Result<(), Error>;

  /// Bulk imports a timetable and returns the server message.
  ///
  /// # Errors
  /// Returns an error if the schedule file can not be read or the request fails.
  fn import(&self, source: &ImportSource) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct Credentials(Option<String>);

impl Credentials {
  pub fn bearer(token: Option<String>) -> Self {
    Self(token.map(|token| token.trim().to_owned()).filter(|token| !token.is_empty()))
  }

  pub const fn is_present(&self) -> bool {
    self.0.is_some()
  }
}

impl core::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("<hidden>")
  }
}

#[derive(Debug, Clone)]
pub struct Client {
  credentials: Credentials,
  agent: Agent,
  base_url: Url,
}

#[derive(serde::Deserialize)]
struct Created {
  #[serde(rename = "eventID")]
  event_id: String,
}

#[derive(serde::Deserialize)]
struct Message {
  #[serde(default)]
  message: String,
}

impl Client {
  pub fn new(credentials: Credentials, base_url: Url) -> Self {
    Self {
      credentials,
      agent: Agent::new(),
      base_url,
    }
  }

  /// Resolves `path` below the base url, keeping any path prefix of the base.
  ///
  /// # Errors
  /// Returns an error if the url can not be joined.
  pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
    let mut base = self.base_url.clone();
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    let mut url = base.join(path)?;
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
  }

  fn request(&self, method: &str, url: &Url) -> ureq::Request {
    let request = self.agent.request_url(method, url);

    match &self.credentials.0 {
      Some(token) => request.set("Authorization", &format!("Bearer {token}")),
      None => request,
    }
  }

  fn ensure_token(&self) -> Result<(), Error> {
    if self.credentials.is_present() {
      Ok(())
    } else {
      Err(Error::auth_required("User not authenticated"))
    }
  }
}

impl Store for Client {
  fn me(&self) -> Result<User, Error> {
    self.ensure_token()?;
    let url = self.endpoint("api/me", &[])?;

    let user: User = read_json(self.request("GET", &url).call()?)?;

    log::debug!("Signed in as {}", user.email);

    Ok(user)
  }

  fn events(&self, email: &str) -> Result<Vec<Event>, Error> {
    let url = self.endpoint("api/events/all", &[("email", email)])?;

    let response = self
      .request("GET", &url)
      .set("Content-Type", "application/json")
      .call()?;

    // The backend encodes an empty result as `null`
    let events: Option<Vec<Event>> = read_json(response)?;

    Ok(events.unwrap_or_default())
  }

  fn create(&self, event: &Event) -> Result<String, Error> {
    let url = self.endpoint("api/events/create", &[])?;

    let created: Created = read_json(self.request("POST", &url).send_json(event)?)?;

    if created.event_id.is_empty() {
      return Err(Error::new(ErrorKind::Parsing, "Server did not return an event id"));
    }

    Ok(created.event_id)
  }

  fn update(&self, event_id: &str, event: &Event) -> Result<(), Error> {
    let url = self.endpoint("api/events/update", &[("eventID", event_id)])?;

    self.request("PUT", &url).send_json(event)?;

    Ok(())
  }

  fn delete(&self, event_id: &str) -> Result<(), Error> {
    let url = self.endpoint("api/events/delete", &[("eventID", event_id)])?;

    self.request("DELETE", &url).call()?;

    Ok(())
  }

  fn import(&self, source: &ImportSource) -> Result<String, Error> {
    self.ensure_token()?;
    let url = self.endpoint("api/import-ntnu-timetable", &[])?;

    let mut form = Multipart::new();
    if let Some(timetable) = &source.url {
      form.text("url", timetable.as_str());
    }
    if let Some(path) = &source.file {
      form.file("icsFile", path)?;
    }

    let body = self
      .request("POST", &url)
      .set("Content-Type", &form.content_type())
      .send_bytes(&form.finish())?
      .into_string()?;

    Ok(serde_json::from_str::<Message>(&body).map_or(body, |message| message.message))
  }
}

fn read_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T, Error> {
  let body = response.into_string()?;

  Ok(serde_json::from_str(&body)?)
}

/// A `multipart/form-data` body.
#[derive(Debug)]
pub struct Multipart {
  boundary: String,
  body: Vec<u8>,
}

impl Multipart {
  pub fn new() -> Self {
    Self {
      boundary: format!("----shared-calendar-{}", uuid::Uuid::new_v4().simple()),
      body: Vec::new(),
    }
  }

  pub fn content_type(&self) -> String {
    format!("multipart/form-data; boundary={}", self.boundary)
  }

  pub fn text(&mut self, name: &str, value: &str) {
    self.header(name, None, None);
    self.body.extend_from_slice(value.as_bytes());
    self.body.extend_from_slice(b"\r\n");
  }

  /// # Errors
  /// Returns an error if the file can not be read.
  pub fn file(&mut self, name: &str, path: &Path) -> Result<(), Error> {
    let content = std::fs::read(path)?;
    let filename = path
      .file_name()
      .map_or_else(|| "schedule.ics".to_owned(), |name| name.to_string_lossy().into_owned());

    self.header(name, Some(&filename), Some("text/calendar"));
    self.body.extend_from_slice(&content);
    self.body.extend_from_slice(b"\r\n");

    Ok(())
  }

  pub fn finish(mut self) -> Vec<u8> {
    self.body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
    self.body
  }

  fn header(&mut self, name: &str, filename: Option<&str>, content_type: Option<&str>) {
    let mut header = format!("--{}\r\nContent-Disposition: form-data; name=\"{name}\"", self.boundary);
    if let Some(filename) = filename {
      let filename: String = filename.chars().filter(|c| !matches!(c, '"' | '\r' | '\n')).collect();
      header.push_str(&format!("; filename=\"{filename}\""));
    }
    header.push_str("\r\n");
    if let Some(content_type) = content_type {
      header.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    header.push_str("\r\n");

    self.body.extend_from_slice(header.as_bytes());
  }
}

impl Default for Multipart {
  fn default() -> Self {
    Self::new()
  }
}
