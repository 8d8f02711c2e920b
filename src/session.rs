//! Durable storage for the logged-in user's credentials
//!
//! The browser version of this application keeps the bearer token and the
//! user's email in local storage under the `access_token` and `user_email`
//! keys; this module keeps them in a small JSON backing file instead. It is
//! read at startup to decide whether the user is already authenticated, and
//! deleted on logout.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The credentials of a logged-in user, tied to a backing file
#[derive(Debug, PartialEq)]
pub struct Session {
    backing_file: PathBuf,
    data: SessionData,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct SessionData {
    access_token: String,
    user_email: String,
}

impl Session {
    /// The default path to the session file
    pub fn session_file() -> PathBuf {
        PathBuf::from(String::from("~/.config/planer-client/session.json"))
    }

    /// Create a session from freshly obtained credentials (i.e. right after login)
    pub fn new<P: AsRef<Path>, S: ToString, T: ToString>(path: P, access_token: S, user_email: T) -> Self {
        Self {
            backing_file: PathBuf::from(path.as_ref()),
            data: SessionData {
                access_token: access_token.to_string(),
                user_email: user_email.to_string(),
            },
        }
    }

    /// Initialize a session from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Store the current session to its backing file
    pub fn save_to_file(&self) {
        let path = &self.backing_file;
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }

    /// Log out: forget the credentials and remove the backing file
    pub fn clear(self) {
        if let Err(err) = std::fs::remove_file(&self.backing_file) {
            log::warn!("Unable to remove session file {:?}: {}", self.backing_file, err);
        }
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    pub fn user_email(&self) -> &str {
        &self.data.user_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_session() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");

        let session = Session::new(&session_path, "an-opaque-token", "you@example.com");
        session.save_to_file();

        let retrieved = Session::from_file(&session_path).unwrap();
        assert_eq!(session, retrieved);
        assert_eq!(retrieved.access_token(), "an-opaque-token");
        assert_eq!(retrieved.user_email(), "you@example.com");
    }

    #[test]
    fn a_missing_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::from_file(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn clearing_removes_the_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");

        let session = Session::new(&session_path, "token", "you@example.com");
        session.save_to_file();
        assert!(session_path.exists());

        Session::from_file(&session_path).unwrap().clear();
        assert!(session_path.exists() == false);
    }
}
