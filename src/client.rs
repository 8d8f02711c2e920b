//! This module provides a client to connect to the planner REST server

use std::error::Error;

use async_trait::async_trait;
use url::Url;

use crate::session::Session;
use crate::store::DateKey;
use crate::traits::NoteSource;
use crate::wire::{CreateResponse, Note, NotePayload};

/// A [`NoteSource`] that fetches its data from the actual server.
///
/// The bearer credential is passed in explicitly at construction (usually
/// from a persisted [`Session`]); it is never read from ambient storage
/// inside individual calls.
pub struct Client {
    base_url: Url,
    access_token: String,

    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString>(base_url: S, access_token: T) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            base_url,
            access_token: access_token.to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Create a client against the configured [`base URL`](crate::config::BASE_URL),
    /// authenticated as the given session
    pub fn from_session(session: &Session) -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::base_url(), session.access_token())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl NoteSource for Client {
    async fn list_notes(&self, date: Option<&DateKey>) -> Result<Vec<Note>, Box<dyn Error>> {
        let mut url = self.endpoint("notes")?;
        if let Some(date) = date {
            url.query_pairs_mut().append_pair("date", &date.to_string());
        }

        let response = self.http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} when listing notes", response.status()).into());
        }

        let notes = response.json::<Vec<Note>>().await?;
        log::debug!("Fetched {} note(s) from the server", notes.len());
        Ok(notes)
    }

    async fn create_note(&self, payload: &NotePayload) -> Result<String, Box<dyn Error>> {
        let url = self.endpoint("notes/create")?;
        let response = self.http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} when creating a note", response.status()).into());
        }

        let created = response.json::<CreateResponse>().await?;
        Ok(created.data.id)
    }

    async fn update_note(&self, id: &str, payload: &NotePayload) -> Result<(), Box<dyn Error>> {
        let url = self.endpoint(&format!("notes/update/{}", id))?;
        let response = self.http
            .put(url)
            .bearer_auth(&self.access_token)
            .json(payload)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} when updating note {}", response.status(), id).into());
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), Box<dyn Error>> {
        let url = self.endpoint(&format!("notes/delete/{}", id))?;
        let response = self.http
            .delete(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?} when deleting note {}", response.status(), id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_onto_the_base_url() {
        let client = Client::new("https://app-planer.online", "token").unwrap();
        assert_eq!(client.endpoint("notes").unwrap().as_str(), "https://app-planer.online/notes");
        assert_eq!(
            client.endpoint("notes/update/42").unwrap().as_str(),
            "https://app-planer.online/notes/update/42"
        );
    }

    #[test]
    fn an_invalid_base_url_is_rejected() {
        assert!(Client::new("not a url", "token").is_err());
    }
}
