// src/core/gate.rs
//! Feature flags, daily per-subject quotas and the waitlist

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

use crate::core::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    ResumeProcessing,
    GithubDeploy,
    NetlifyDeploy,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 3] = [
        FeatureFlag::ResumeProcessing,
        FeatureFlag::GithubDeploy,
        FeatureFlag::NetlifyDeploy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ResumeProcessing => "resume_processing",
            Self::GithubDeploy => "github_deploy",
            Self::NetlifyDeploy => "netlify_deploy",
        }
    }
}

impl FromStr for FeatureFlag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|flag| flag.name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown feature flag: {}", s))
    }
}

impl std::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub resume_per_day: u32,
    pub deploy_per_day: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            resume_per_day: 5,
            deploy_per_day: 10,
        }
    }
}

impl QuotaLimits {
    pub fn limit_for(&self, flag: FeatureFlag) -> u32 {
        match flag {
            FeatureFlag::ResumeProcessing => self.resume_per_day,
            FeatureFlag::GithubDeploy | FeatureFlag::NetlifyDeploy => self.deploy_per_day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed { remaining: u32 },
    Disabled,
    QuotaExhausted { limit: u32 },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Allowed { .. } => "OK",
            Self::Disabled => "FEATURE_DISABLED",
            Self::QuotaExhausted { .. } => "QUOTA_EXCEEDED",
        }
    }

    pub fn message(&self, flag: FeatureFlag) -> String {
        match self {
            Self::Allowed { remaining } => format!("{} allowed, {} left today", flag, remaining),
            Self::Disabled => format!("{} is temporarily unavailable", flag),
            Self::QuotaExhausted { limit } => format!(
                "{} is temporarily unavailable: daily limit of {} reached",
                flag, limit
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagStatus {
    pub flag: FeatureFlag,
    pub enabled: bool,
}

pub struct AccessGate {
    db: Database,
    limits: QuotaLimits,
}

impl AccessGate {
    pub fn new(db: Database, limits: QuotaLimits) -> Self {
        Self { db, limits }
    }

    pub fn limits(&self) -> QuotaLimits {
        self.limits
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// A flag without a row is enabled
    pub async fn is_enabled(&self, flag: FeatureFlag) -> Result<bool> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT enabled FROM feature_flags WHERE name = ?")
            .bind(flag.name())
            .fetch_optional(self.db.pool())
            .await
            .with_context(|| format!("Failed to read feature flag {}", flag))?;

        Ok(row.map(|(enabled,)| enabled).unwrap_or(true))
    }

    pub async fn set_flag(&self, flag: FeatureFlag, enabled: bool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feature_flags (name, enabled) VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE SET enabled = excluded.enabled, updated_at = datetime('now')
            "#,
        )
        .bind(flag.name())
        .bind(enabled)
        .execute(self.db.pool())
        .await
        .with_context(|| format!("Failed to update feature flag {}", flag))?;

        info!("Feature flag {} set to {}", flag, enabled);
        Ok(())
    }

    pub async fn flags(&self) -> Result<Vec<FlagStatus>> {
        let mut statuses = Vec::with_capacity(FeatureFlag::ALL.len());
        for flag in FeatureFlag::ALL {
            statuses.push(FlagStatus {
                flag,
                enabled: self.is_enabled(flag).await?,
            });
        }
        Ok(statuses)
    }

    /// Flag check plus one unit of today's quota for `subject`
    pub async fn check_and_consume(&self, flag: FeatureFlag, subject: &str) -> Result<GateDecision> {
        let day = Utc::now().format("%Y-%m-%d").to_string();
        self.check_and_consume_on(flag, subject, &day).await
    }

    pub async fn check_and_consume_on(
        &self,
        flag: FeatureFlag,
        subject: &str,
        day: &str,
    ) -> Result<GateDecision> {
        if !self.is_enabled(flag).await? {
            warn!("Rejected {} for {}: feature disabled", flag, subject);
            return Ok(GateDecision::Disabled);
        }

        let limit = self.limits.limit_for(flag);
        if limit == 0 {
            return Ok(GateDecision::QuotaExhausted { limit });
        }

        // Insert-or-increment in one statement; no row comes back once the limit is reached
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO usage_counters (subject, feature, day, count) VALUES (?, ?, ?, 1)
            ON CONFLICT(subject, feature, day)
            DO UPDATE SET count = usage_counters.count + 1 WHERE usage_counters.count < ?
            RETURNING count
            "#,
        )
        .bind(subject)
        .bind(flag.name())
        .bind(day)
        .bind(limit as i64)
        .fetch_optional(self.db.pool())
        .await
        .with_context(|| format!("Failed to record usage of {}", flag))?;

        match row {
            Some((count,)) => Ok(GateDecision::Allowed {
                remaining: limit.saturating_sub(count as u32),
            }),
            None => {
                warn!("Rejected {} for {}: daily limit {} reached", flag, subject, limit);
                Ok(GateDecision::QuotaExhausted { limit })
            }
        }
    }

    pub async fn usage_on(&self, flag: FeatureFlag, subject: &str, day: &str) -> Result<u32> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT count FROM usage_counters WHERE subject = ? AND feature = ? AND day = ?",
        )
        .bind(subject)
        .bind(flag.name())
        .bind(day)
        .fetch_optional(self.db.pool())
        .await
        .context("Failed to read usage counter")?;

        Ok(row.map(|(count,)| count as u32).unwrap_or(0))
    }

    /// Returns `true` when the entry is new; repeated sign-ups are no-ops
    pub async fn join_waitlist(&self, email: &str, flag: FeatureFlag) -> Result<bool> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            anyhow::bail!("Invalid email address: {}", email);
        }

        let result = sqlx::query("INSERT OR IGNORE INTO waitlist (email, feature) VALUES (?, ?)")
            .bind(&email)
            .bind(flag.name())
            .execute(self.db.pool())
            .await
            .context("Failed to add waitlist entry")?;

        let added = result.rows_affected() == 1;
        if added {
            info!("Added {} to the {} waitlist", email, flag);
        }
        Ok(added)
    }

    pub async fn waitlist_count(&self, flag: FeatureFlag) -> Result<u32> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM waitlist WHERE feature = ?")
            .bind(flag.name())
            .fetch_one(self.db.pool())
            .await
            .context("Failed to count waitlist entries")?;
        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn gate(resume_per_day: u32) -> AccessGate {
        let db = Database::in_memory().await.unwrap();
        AccessGate::new(
            db,
            QuotaLimits {
                resume_per_day,
                deploy_per_day: 1,
            },
        )
    }

    #[test]
    fn test_flag_names_parse() {
        for flag in FeatureFlag::ALL {
            assert_eq!(flag.name().parse::<FeatureFlag>().unwrap(), flag);
        }
        assert_eq!("github-deploy".parse::<FeatureFlag>().unwrap(), FeatureFlag::GithubDeploy);
        assert!("teleport".parse::<FeatureFlag>().is_err());
    }

    #[tokio::test]
    async fn test_missing_flag_row_means_enabled() {
        let gate = gate(2).await;
        assert!(gate.is_enabled(FeatureFlag::ResumeProcessing).await.unwrap());

        gate.set_flag(FeatureFlag::ResumeProcessing, false).await.unwrap();
        assert!(!gate.is_enabled(FeatureFlag::ResumeProcessing).await.unwrap());

        gate.set_flag(FeatureFlag::ResumeProcessing, true).await.unwrap();
        assert!(gate.is_enabled(FeatureFlag::ResumeProcessing).await.unwrap());
    }

    #[tokio::test]
    async fn test_quota_is_per_subject_and_day() {
        let gate = gate(2).await;
        let flag = FeatureFlag::ResumeProcessing;

        assert_eq!(
            gate.check_and_consume_on(flag, "10.0.0.1", "2026-01-01").await.unwrap(),
            GateDecision::Allowed { remaining: 1 }
        );
        assert_eq!(
            gate.check_and_consume_on(flag, "10.0.0.1", "2026-01-01").await.unwrap(),
            GateDecision::Allowed { remaining: 0 }
        );
        assert_eq!(
            gate.check_and_consume_on(flag, "10.0.0.1", "2026-01-01").await.unwrap(),
            GateDecision::QuotaExhausted { limit: 2 }
        );
        assert_eq!(gate.usage_on(flag, "10.0.0.1", "2026-01-01").await.unwrap(), 2);

        assert!(gate
            .check_and_consume_on(flag, "10.0.0.2", "2026-01-01")
            .await
            .unwrap()
            .is_allowed());
        assert!(gate
            .check_and_consume_on(flag, "10.0.0.1", "2026-01-02")
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn test_disabled_flag_short_circuits() {
        let gate = gate(5).await;
        gate.set_flag(FeatureFlag::GithubDeploy, false).await.unwrap();

        let decision = gate
            .check_and_consume_on(FeatureFlag::GithubDeploy, "ip", "2026-01-01")
            .await
            .unwrap();
        assert_eq!(decision, GateDecision::Disabled);
        assert_eq!(decision.error_code(), "FEATURE_DISABLED");
        assert_eq!(
            gate.usage_on(FeatureFlag::GithubDeploy, "ip", "2026-01-01").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_zero_limit_rejects() {
        let gate = gate(0).await;
        let decision = gate
            .check_and_consume(FeatureFlag::ResumeProcessing, "ip")
            .await
            .unwrap();
        assert_eq!(decision, GateDecision::QuotaExhausted { limit: 0 });
    }

    #[tokio::test]
    async fn test_waitlist_is_idempotent() {
        let gate = gate(1).await;
        assert!(gate.join_waitlist("Jane@Example.com", FeatureFlag::NetlifyDeploy).await.unwrap());
        assert!(!gate.join_waitlist("jane@example.com ", FeatureFlag::NetlifyDeploy).await.unwrap());
        assert!(gate.join_waitlist("jane@example.com", FeatureFlag::GithubDeploy).await.unwrap());
        assert_eq!(gate.waitlist_count(FeatureFlag::NetlifyDeploy).await.unwrap(), 1);
        assert!(gate.join_waitlist("not-an-email", FeatureFlag::GithubDeploy).await.is_err());
    }

    #[tokio::test]
    async fn test_flags_listing_order() {
        let gate = gate(1).await;
        gate.set_flag(FeatureFlag::NetlifyDeploy, false).await.unwrap();
        let flags = gate.flags().await.unwrap();
        assert_eq!(
            flags,
            vec![
                FlagStatus { flag: FeatureFlag::ResumeProcessing, enabled: true },
                FlagStatus { flag: FeatureFlag::GithubDeploy, enabled: true },
                FlagStatus { flag: FeatureFlag::NetlifyDeploy, enabled: false },
            ]
        );
    }
}
