// src/session.rs
//! Provider access tokens with explicit expiry

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::FsOps;
use crate::deploy::Provider;

pub type Clock = fn() -> DateTime<Utc>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub stored_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| now >= at).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    Never,
    After(Duration),
}

impl ExpiryPolicy {
    /// Non-positive or absent hours mean the token never expires
    pub fn hours(hours: Option<i64>) -> Result<Self> {
        match hours {
            Some(h) if h > 0 => Duration::try_hours(h)
                .map(Self::After)
                .with_context(|| format!("Token lifetime of {} hours is out of range", h)),
            _ => Ok(Self::Never),
        }
    }

    fn expires_at(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        match self {
            Self::Never => Ok(None),
            Self::After(ttl) => now
                .checked_add_signed(*ttl)
                .map(Some)
                .context("Token expiry falls outside the supported date range"),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Live credential for `provider`; expired entries are evicted and reported as absent
    async fn get(&self, provider: Provider) -> Result<Option<Credential>>;

    async fn set(&self, provider: Provider, token: &str, policy: ExpiryPolicy) -> Result<Credential>;

    /// Returns `true` when something was removed
    async fn clear(&self, provider: Provider) -> Result<bool>;
}

fn new_credential(token: &str, policy: ExpiryPolicy, now: DateTime<Utc>) -> Result<Credential> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token cannot be empty");
    }
    Ok(Credential {
        token: token.to_string(),
        stored_at: now,
        expires_at: policy.expires_at(now)?,
    })
}

// ===== In-memory =====

pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<Provider, Credential>>,
    clock: Clock,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, provider: Provider) -> Result<Option<Credential>> {
        let mut entries = self.entries.lock().await;
        let now = (self.clock)();
        if entries.get(&provider).map(|c| c.is_expired(now)).unwrap_or(false) {
            entries.remove(&provider);
            debug!("Evicted expired {} credential", provider);
        }
        Ok(entries.get(&provider).cloned())
    }

    async fn set(&self, provider: Provider, token: &str, policy: ExpiryPolicy) -> Result<Credential> {
        let credential = new_credential(token, policy, (self.clock)())?;
        self.entries.lock().await.insert(provider, credential.clone());
        Ok(credential)
    }

    async fn clear(&self, provider: Provider) -> Result<bool> {
        Ok(self.entries.lock().await.remove(&provider).is_some())
    }
}

// ===== JSON file =====

pub struct FileCredentialStore {
    path: PathBuf,
    clock: Clock,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self::with_clock(path, Utc::now)
    }

    pub fn with_clock(path: PathBuf, clock: Clock) -> Self {
        Self {
            path,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<Provider, Credential>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = FsOps::read_file_safe(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {}", self.path.display()))
    }

    async fn write_all(&self, entries: &BTreeMap<Provider, Credential>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries).context("Failed to serialize credentials")?;
        FsOps::write_file_safe(&self.path, &content).await
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, provider: Provider) -> Result<Option<Credential>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;

        let now = (self.clock)();
        if entries.get(&provider).map(|c| c.is_expired(now)).unwrap_or(false) {
            entries.remove(&provider);
            self.write_all(&entries).await?;
            info!("Removed expired {} credential from {}", provider, self.path.display());
            return Ok(None);
        }
        Ok(entries.remove(&provider))
    }

    async fn set(&self, provider: Provider, token: &str, policy: ExpiryPolicy) -> Result<Credential> {
        let _guard = self.lock.lock().await;
        let credential = new_credential(token, policy, (self.clock)())?;

        let mut entries = self.read_all().await?;
        entries.insert(provider, credential.clone());
        self.write_all(&entries).await?;

        info!("Stored {} credential in {}", provider, self.path.display());
        Ok(credential)
    }

    async fn clear(&self, provider: Provider) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let removed = entries.remove(&provider).is_some();
        if removed {
            self.write_all(&entries).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn next_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_expiry_policy_hours() {
        assert_eq!(ExpiryPolicy::hours(None).unwrap(), ExpiryPolicy::Never);
        assert_eq!(ExpiryPolicy::hours(Some(0)).unwrap(), ExpiryPolicy::Never);
        assert_eq!(
            ExpiryPolicy::hours(Some(2)).unwrap(),
            ExpiryPolicy::After(Duration::hours(2))
        );
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        assert!(ExpiryPolicy::hours(Some(i64::MAX)).is_err());
    }

    #[tokio::test]
    async fn test_expiry_past_date_range_is_rejected() {
        // Representable as a duration, but far beyond chrono's maximum date
        let policy = ExpiryPolicy::After(Duration::days(100_000_000));
        let store = MemoryCredentialStore::with_clock(noon);
        assert!(store.set(Provider::Github, "tok", policy).await.is_err());
        assert_eq!(store.get(Provider::Github).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::with_clock(noon);
        let stored = store
            .set(Provider::Github, " ghp_token ", ExpiryPolicy::hours(Some(1)).unwrap())
            .await
            .unwrap();
        assert_eq!(stored.token, "ghp_token");
        assert_eq!(stored.expires_at, Some(noon() + Duration::hours(1)));

        assert_eq!(store.get(Provider::Github).await.unwrap(), Some(stored));
        assert_eq!(store.get(Provider::Netlify).await.unwrap(), None);
        assert!(store.clear(Provider::Github).await.unwrap());
        assert!(!store.clear(Provider::Github).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_store_evicts_expired() {
        let writer = MemoryCredentialStore::with_clock(noon);
        writer
            .set(Provider::Netlify, "tok", ExpiryPolicy::hours(Some(1)).unwrap())
            .await
            .unwrap();

        let entries = writer.entries.into_inner();
        let reader = MemoryCredentialStore {
            entries: Mutex::new(entries),
            clock: next_day,
        };
        assert_eq!(reader.get(Provider::Netlify).await.unwrap(), None);
        assert!(reader.entries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let store = MemoryCredentialStore::new();
        assert!(store.set(Provider::Github, "   ", ExpiryPolicy::Never).await.is_err());
    }

    #[tokio::test]
    async fn test_file_store_persists_and_expires() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds/credentials.json");

        let store = FileCredentialStore::with_clock(path.clone(), noon);
        store
            .set(Provider::Github, "gh", ExpiryPolicy::Never)
            .await
            .unwrap();
        store
            .set(Provider::Netlify, "nf", ExpiryPolicy::hours(Some(2)).unwrap())
            .await
            .unwrap();

        let later = FileCredentialStore::with_clock(path.clone(), next_day);
        assert_eq!(later.get(Provider::Github).await.unwrap().unwrap().token, "gh");
        assert_eq!(later.get(Provider::Netlify).await.unwrap(), None);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"github\""));
        assert!(!raw.contains("\"netlify\""));
    }

    #[tokio::test]
    async fn test_file_store_clear_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("none.json"));
        assert!(!store.clear(Provider::Github).await.unwrap());
        assert_eq!(store.get(Provider::Github).await.unwrap(), None);
    }
}
