//! Record store: TTL'd key-value persistence for analysis records plus
//! capped per-user lists (search history, match notifications).

pub mod archive;

use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

const DAY_SECS: u64 = 86_400;

/// Capped list sizes.
pub const HISTORY_CAP: usize = 10;
pub const NOTIFICATIONS_CAP: usize = 20;

/// TTL applied to the capped lists, refreshed on every push.
const LIST_TTL_SECS: u64 = 90 * DAY_SECS;

/// Record classes and their retention windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    Search,
    Analysis,
    Optimization,
    Market,
    Profile,
}

impl RecordClass {
    fn key_prefix(&self) -> &'static str {
        match self {
            RecordClass::Search => "search",
            RecordClass::Analysis => "analysis",
            RecordClass::Optimization => "optimization",
            RecordClass::Market => "market",
            RecordClass::Profile => "profile",
        }
    }

    /// Retention per class. Profiles never expire.
    pub fn ttl_secs(&self) -> Option<u64> {
        match self {
            RecordClass::Search => Some(90 * DAY_SECS),
            RecordClass::Analysis => Some(90 * DAY_SECS),
            RecordClass::Optimization => Some(180 * DAY_SECS),
            RecordClass::Market => Some(30 * DAY_SECS),
            RecordClass::Profile => None,
        }
    }

    pub fn key(&self, suffix: &str) -> String {
        format!("{}:{}", self.key_prefix(), suffix)
    }
}

pub fn history_key(user_id: &str) -> String {
    format!("history:{user_id}")
}

pub fn notifications_key(user_id: &str) -> String {
    format!("notifications:{user_id}")
}

/// Redis-backed store. Values are serialized as JSON strings.
#[derive(Clone)]
pub struct RecordStore {
    client: redis::Client,
}

impl RecordStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// Writes a record under its class key, applying the class TTL.
    pub async fn put<T: Serialize>(
        &self,
        class: RecordClass,
        suffix: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let payload = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("record serialization failed: {e}")))?;
        let key = class.key(suffix);
        let mut conn = self.connection().await?;
        match class.ttl_secs() {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, payload, ttl).await?,
            None => conn.set::<_, _, ()>(&key, payload).await?,
        }
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        class: RecordClass,
        suffix: &str,
    ) -> Result<Option<T>, AppError> {
        let key = class.key(suffix);
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.get(&key).await?;
        match payload {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("stored record at {key} is corrupt: {e}"))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Prepends to a capped list, trimming to `cap` and refreshing the list TTL.
    pub async fn push_capped<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        cap: usize,
    ) -> Result<(), AppError> {
        let payload = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("record serialization failed: {e}")))?;
        let mut conn = self.connection().await?;
        redis::pipe()
            .atomic()
            .lpush(key, payload)
            .ltrim(key, 0, cap as isize - 1)
            .expire(key, LIST_TTL_SECS as i64)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Reads a capped list newest-first. Entries that no longer deserialize
    /// (schema drift across deploys) are skipped rather than failing the read.
    pub async fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Vec<String> = conn.lrange(key, 0, -1).await?;
        Ok(raw
            .iter()
            .filter_map(|item| serde_json::from_str(item).ok())
            .collect())
    }
}
