//! The HTTP room client.
//!
//! All four service operations are form-POSTs returning JSON. Requests are
//! independent; nothing here holds board state, so a response landing after
//! the board is gone has nothing stale to update.

use crate::types::{ConfigEnvelope, CreatedRoom, Progress, SessionKey};
use crate::RoomError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sg_core::model::BoardSetup;
use std::time::Duration;

/// Submitted images travel as data URLs, the way a canvas exports them.
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// How often to re-ask the room for completion counts. The loop re-arms
/// only after each round-trip finishes, so this is also a rate limit.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(9);

/// Client for one room service instance.
pub struct RoomClient {
    http: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl RoomClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval (useful for testing).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn endpoint(&self, op: &str) -> String {
        format!("{}/api/{op}", self.base_url.trim_end_matches('/'))
    }

    /// Fetch this participant's board setup.
    ///
    /// With no session key the service invents a standalone single-player
    /// config. Any missing or mangled field comes back as
    /// [`RoomError::Malformed`]; callers are expected to degrade to
    /// [`BoardSetup::standalone`] rather than give up.
    pub async fn get_config(&self, key: Option<&SessionKey>) -> Result<BoardSetup, RoomError> {
        let mut form: Vec<(&str, String)> = Vec::new();
        if let Some(k) = key {
            form.push(("id", k.room.to_string()));
            form.push(("uid", k.user.to_string()));
        }

        let resp = self
            .http
            .post(self.endpoint("get_config"))
            .form(&form)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(RoomError::Status(resp.status()));
        }
        let envelope: ConfigEnvelope = resp
            .json()
            .await
            .map_err(|e| RoomError::Malformed(e.to_string()))?;
        envelope.into_setup()
    }

    /// Submit the finished stroke. Fire-and-forget: a success here only
    /// acknowledges receipt, after which callers move to polling.
    pub async fn send_strokes(&self, key: &SessionKey, png: &[u8]) -> Result<(), RoomError> {
        log::info!("submitting {} byte stroke for room {}", png.len(), key.room);
        let resp = self
            .http
            .post(self.endpoint("send_strokes"))
            .form(&[
                ("id", key.room.to_string()),
                ("uid", key.user.to_string()),
                ("img", encode_data_url(png)),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(RoomError::Status(resp.status()));
        }
        Ok(())
    }

    /// One completion-count round-trip.
    pub async fn get_done(&self, key: &SessionKey) -> Result<Progress, RoomError> {
        let resp = self
            .http
            .post(self.endpoint("get_done"))
            .form(&[("id", key.room.to_string()), ("uid", key.user.to_string())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(RoomError::Status(resp.status()));
        }
        let triple: [u32; 3] = resp
            .json()
            .await
            .map_err(|e| RoomError::Malformed(e.to_string()))?;
        Ok(Progress::from_wire(triple))
    }

    /// Create a room for `participants` people and hand back their keys.
    pub async fn create_room(&self, participants: u32) -> Result<CreatedRoom, RoomError> {
        let resp = self
            .http
            .post(self.endpoint("create_room"))
            .form(&[("num", participants.to_string())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(RoomError::Status(resp.status()));
        }
        let ids: Vec<u32> = resp
            .json()
            .await
            .map_err(|e| RoomError::Malformed(e.to_string()))?;
        CreatedRoom::from_wire(ids, participants)
    }

    /// Poll completion counts until everyone has submitted.
    ///
    /// Sleeps `poll_interval` after each round-trip, so a slow service
    /// naturally slows the polling down. Transport errors propagate; the
    /// caller decides whether to retry a fresh poll.
    pub async fn poll_completion(&self, key: &SessionKey) -> Result<Progress, RoomError> {
        loop {
            let progress = self.get_done(key).await?;
            log::debug!(
                "room {}: {}/{} submitted",
                key.room,
                progress.done,
                progress.total
            );
            if progress.is_complete() {
                return Ok(progress);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// `data:image/png;base64,` encoding of a PNG byte stream.
fn encode_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(DATA_URL_PREFIX);
    url.push_str(&BASE64.encode(png));
    url
}
