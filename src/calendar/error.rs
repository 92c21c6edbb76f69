use std::fmt::{Display, Formatter};

/// Errors that may occur while editing, loading or storing events.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
  /// A required field is missing or malformed, caught before any request
  Validation,
  /// The action needs a signed in user, or the server rejected the token
  AuthRequired,
  /// The request never produced a response
  Http,
  /// The server answered with a non-2xx status
  Server,
  /// The timetable URL is not importable
  ImportFormat,
  /// The response body could not be read
  Parsing,
  Io,
}

impl Error {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Validation, message)
  }

  pub fn auth_required(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::AuthRequired, message)
  }

  pub fn is(&self, kind: ErrorKind) -> bool {
    self.kind == kind
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}

impl std::error::Error for Error {}

impl From<ureq::Error> for Error {
  fn from(e: ureq::Error) -> Self {
    match e {
      ureq::Error::Status(code, response) => {
        let body = response.into_string().unwrap_or_default();

        Self {
          kind: match code {
            401 | 403 => ErrorKind::AuthRequired,
            _ => ErrorKind::Server,
          },
          message: server_message(code, &body),
        }
      }
      ureq::Error::Transport(transport) => Self {
        kind: ErrorKind::Http,
        message: transport.to_string(),
      },
    }
  }
}

impl From<url::ParseError> for Error {
  fn from(e: url::ParseError) -> Self {
    Self {
      kind: ErrorKind::Parsing,
      message: e.to_string(),
    }
  }
}

impl From<serde_json::Error> for Error {
  fn from(e: serde_json::Error) -> Self {
    Self {
      kind: ErrorKind::Parsing,
      message: e.to_string(),
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Self {
      kind: ErrorKind::Io,
      message: e.to_string(),
    }
  }
}

#[derive(serde::Deserialize)]
struct ServerMessage {
  message: String,
}

/// Failure bodies are either `{"message": ...}` or plain text; both are passed through untouched.
pub fn server_message(code: u16, body: &str) -> String {
  if let Ok(ServerMessage { message }) = serde_json::from_str::<ServerMessage>(body) {
    return message;
  }

  let text = body.trim_end_matches('\n');
  if text.trim().is_empty() {
    format!("Request failed with status {code}")
  } else {
    text.to_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_message_is_extracted() {
    assert_eq!(server_message(400, r#"{"message":"Invalid event type"}"#), "Invalid event type");
  }

  #[test]
  fn plain_text_is_passed_through() {
    assert_eq!(server_message(500, "Failed to parse ICS file\n"), "Failed to parse ICS file");
  }

  #[test]
  fn empty_body_names_the_status() {
    assert_eq!(server_message(502, ""), "Request failed with status 502");
  }

  #[test]
  fn rejected_tokens_need_a_new_sign_in() {
    let status = |code| {
      let response = ureq::Response::new(code, "Failed", r#"{"message":"bad token"}"#).unwrap();
      Error::from(ureq::Error::Status(code, response))
    };

    assert_eq!(status(401), Error::auth_required("bad token"));
    assert!(status(403).is(ErrorKind::AuthRequired));
    assert!(status(500).is(ErrorKind::Server));
  }

  #[test]
  fn kinds_are_compared() {
    let error = Error::validation("Please fill in all fields");

    assert!(error.is(ErrorKind::Validation));
    assert!(!error.is(ErrorKind::Server));
    assert_eq!(error.to_string(), "Please fill in all fields");
  }
}
