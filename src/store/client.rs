use std::time::Duration;

use crate::store::StoreError;
#[cfg(feature = "network")]
use crate::store::schema;
use crate::trainer::word::Word;

/// Backend holding the word list. Words are addressed by their position in
/// the list as last returned by `list_words`.
pub trait WordStore: Send + Sync {
    fn list_words(&self) -> Result<Vec<Word>, StoreError>;
    fn delete_word(&self, index: usize) -> Result<(), StoreError>;
    fn add_word(&self, word: &Word) -> Result<(), StoreError>;
    fn update_word(&self, index: usize, word: &Word) -> Result<(), StoreError>;
    /// Raw export of the whole list, saved by the caller as `words.json`.
    fn download(&self) -> Result<Vec<u8>, StoreError>;
}

pub struct HttpWordStore {
    base_url: String,
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
}

impl HttpWordStore {
    #[cfg(feature = "network")]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    #[cfg(not(feature = "network"))]
    pub fn new(base_url: &str, _timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(feature = "network")]
    fn with_client(base_url: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

#[cfg(feature = "network")]
fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        reason: schema::rejection_reason(&body),
    })
}

#[cfg(feature = "network")]
impl WordStore for HttpWordStore {
    fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        let url = self.endpoint("words");
        tracing::debug!(%url, "GET");
        let response = check_status(self.client.get(&url).send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn delete_word(&self, index: usize) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("words/{index}"));
        tracing::debug!(%url, "DELETE");
        check_status(self.client.delete(&url).send()?)?;
        Ok(())
    }

    fn add_word(&self, word: &Word) -> Result<(), StoreError> {
        let url = self.endpoint("words");
        tracing::debug!(%url, word = %word.word, "POST");
        check_status(self.client.post(&url).json(word).send()?)?;
        Ok(())
    }

    fn update_word(&self, index: usize, word: &Word) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("words/{index}"));
        tracing::debug!(%url, word = %word.word, "PUT");
        check_status(self.client.put(&url).json(word).send()?)?;
        Ok(())
    }

    fn download(&self) -> Result<Vec<u8>, StoreError> {
        let url = self.endpoint("download");
        tracing::debug!(%url, "GET");
        let response = check_status(self.client.get(&url).send()?)?;
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(not(feature = "network"))]
impl WordStore for HttpWordStore {
    fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        Err(StoreError::Offline)
    }

    fn delete_word(&self, _index: usize) -> Result<(), StoreError> {
        Err(StoreError::Offline)
    }

    fn add_word(&self, _word: &Word) -> Result<(), StoreError> {
        Err(StoreError::Offline)
    }

    fn update_word(&self, _index: usize, _word: &Word) -> Result<(), StoreError> {
        Err(StoreError::Offline)
    }

    fn download(&self) -> Result<Vec<u8>, StoreError> {
        Err(StoreError::Offline)
    }
}
