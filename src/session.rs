use std::path::{Path, PathBuf};

use crate::calendar::{Credentials, Error, User};

/// On-disk form of a session.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Stored {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Bearer token and the account it belongs to, optionally backed by a JSON file.
#[derive(Clone, Default)]
pub struct Session {
    path: Option<PathBuf>,
    token: Option<String>,
    user: Option<User>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("token", &self.token.as_ref().map(|_| "<hidden>"))
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    /// Restores the session stored at `path`. A configured `token` wins over the stored one.
    /// Unreadable session files are ignored.
    pub fn hydrate(path: Option<PathBuf>, token: Option<String>) -> Self {
        let stored = path
            .as_deref()
            .filter(|path| path.exists())
            .map(read)
            .transpose()
            .unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable session file: {e}");
                None
            })
            .unwrap_or_default();

        let token = token
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty());

        // A different token may belong to another account
        let user = match (&token, &stored.token) {
            (Some(configured), Some(persisted)) if configured != persisted => None,
            _ => stored.user,
        };

        let session = Self {
            path,
            token: token.or(stored.token),
            user,
        };

        log::debug!("Hydrated session: {session:?}");

        session
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::bearer(self.token.clone())
    }

    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Remembers `user` as the owner of the token and writes the session file.
    ///
    /// # Errors
    /// Returns an error if the session file can not be written.
    pub fn persist(&mut self, user: User) -> Result<(), Error> {
        self.user = Some(user);

        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let stored = Stored {
            token: self.token.clone(),
            user: self.user.clone(),
        };
        std::fs::write(path, serde_json::to_vec_pretty(&stored)?)?;

        Ok(())
    }

    /// Forgets token and user and removes the session file.
    ///
    /// # Errors
    /// Returns an error if the session file exists but can not be removed.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.token = None;
        self.user = None;

        match &self.path {
            Some(path) if path.exists() => Ok(std::fs::remove_file(path)?),
            _ => Ok(()),
        }
    }
}

fn read(path: &Path) -> Result<Stored, Error> {
    let content = std::fs::read_to_string(path)?;

    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            email: "me@example.org".into(),
            username: "me".into(),
        }
    }

    #[test]
    fn persisted_sessions_are_hydrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/session.json");

        let mut session = Session::hydrate(Some(path.clone()), Some("abc".into()));
        session.persist(user()).unwrap();

        let restored = Session::hydrate(Some(path), None);

        assert!(restored.has_token());
        assert!(restored.credentials().is_present());
        assert_eq!(restored.user(), Some(&user()));
    }

    #[test]
    fn configured_token_wins_and_drops_the_stale_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::hydrate(Some(path.clone()), Some("old".into()));
        session.persist(user()).unwrap();

        let restored = Session::hydrate(Some(path), Some("new".into()));

        assert_eq!(restored.token.as_deref(), Some("new"));
        assert_eq!(restored.user(), None);
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::hydrate(Some(path.clone()), Some("abc".into()));
        session.persist(user()).unwrap();
        assert!(path.exists());

        session.clear().unwrap();

        assert!(!path.exists());
        assert!(!session.has_token());
        assert_eq!(session.user(), None);
        assert!(session.clear().is_ok());
    }

    #[test]
    fn broken_session_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let session = Session::hydrate(Some(path), Some("  ".into()));

        assert!(!session.has_token());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn debug_hides_the_token() {
        let session = Session::hydrate(None, Some("secret".into()));

        assert!(!format!("{session:?}").contains("secret"));
    }
}
