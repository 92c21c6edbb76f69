use std::fmt::Display;

/// `RUST_LOG` takes precedence over `level`.
pub fn init(level: log::LevelFilter) {
  env_logger::builder()
  .filter_level(level)
  .parse_default_env()
  .init();
}

/// Logs the error of a result at the given level and hands the result back.
pub trait LogExt {
  fn log_debug(self, msg: &str) -> Self;
  fn log_warn(self, msg: &str) -> Self;
  fn log_error(self, msg: &str) -> Self;
}

impl<T, E> LogExt for Result<T, E> where E: Display {
  #[track_caller]
  fn log_debug(self, msg: &str) -> Self {
    if let Err(error) = &self {
      let location = std::panic::Location::caller();

      log::debug!("[{location}] {msg}: {error}");
    }

    self
  }

  #[track_caller]
  fn log_warn(self, msg: &str) -> Self {
    if let Err(error) = &self {
      let location = std::panic::Location::caller();

      log::warn!("[{location}] {msg}: {error}");
    }

    self
  }

  #[track_caller]
  fn log_error(self, msg: &str) -> Self {
    if let Err(error) = &self {
      let location = std::panic::Location::caller();

      log::error!("[{location}] {msg}: {error}");
    }

    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn results_pass_through() {
    let ok: Result<u8, String> = Ok(1);
    let err: Result<u8, String> = Err("boom".into());

    assert_eq!(ok.log_error("unused"), Ok(1));
    assert_eq!(err.log_warn("failed"), Err("boom".to_owned()));
  }
}
