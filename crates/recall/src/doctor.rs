// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall doctor` command implementation.
//!
//! Checks that the identity database opens and answers queries and that an
//! Anthropic API key is available. No API call is made.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use recall_anthropic::AnthropicProvider;
use recall_config::RecallConfig;
use recall_core::{HealthStatus, PluginAdapter, RecallError};
use recall_storage::SqliteIdentityStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `recall doctor` command.
pub async fn run_doctor(config: &RecallConfig, plain: bool) -> Result<(), RecallError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_database(config).await,
        check_api_key(config).await,
    ];

    println!();
    println!("  recall doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    match issues {
        0 => println!("  All checks passed."),
        1 => println!("  1 issue found."),
        n => println!("  {n} issues found."),
    }
    println!();

    Ok(())
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();

    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        );
    }

    use colored::Colorize;
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!(
        "    {symbol} {:<20} {message} ({duration_ms}ms)",
        result.name
    )
}

/// Configuration was already loaded and validated before this runs.
fn check_config(config: &RecallConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!(
            "valid (buffer {}, extraction every {})",
            config.session.buffer_capacity, config.session.extraction_interval
        ),
        start,
    )
}

/// Opens the identity database without creating it.
async fn check_database(config: &RecallConfig) -> CheckResult {
    let start = Instant::now();
    let db_path = &config.storage.database_path;

    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first run)"),
            start,
        );
    }

    let store = match SqliteIdentityStore::open(config.storage.clone()).await {
        Ok(store) => store,
        Err(e) => return CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    };

    let result = match store.health_check().await {
        Ok(HealthStatus::Healthy) => match store.count().await {
            Ok(count) => CheckResult::new(
                "Database",
                CheckStatus::Pass,
                format!("connected ({count} people)"),
                start,
            ),
            Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
        },
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Database", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Database", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    };
    // Checkpoint failures do not change the verdict.
    let _ = store.shutdown().await;
    result
}

async fn check_api_key(config: &RecallConfig) -> CheckResult {
    let start = Instant::now();
    match AnthropicProvider::new(config) {
        Ok(provider) => match provider.health_check().await {
            Ok(_) => CheckResult::new(
                "Anthropic",
                CheckStatus::Pass,
                format!("API key found (model {})", config.extraction_model()),
                start,
            ),
            Err(e) => CheckResult::new("Anthropic", CheckStatus::Fail, e.to_string(), start),
        },
        Err(e) => CheckResult::new("Anthropic", CheckStatus::Fail, e.to_string(), start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_config::model::StorageConfig;
    use tempfile::tempdir;

    fn config_with_db(path: &Path) -> RecallConfig {
        RecallConfig {
            storage: StorageConfig {
                database_path: path.to_string_lossy().into_owned(),
                wal_mode: true,
            },
            ..RecallConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_database_is_a_warning() {
        let dir = tempdir().unwrap();
        let config = config_with_db(&dir.path().join("absent.db"));
        let result = check_database(&config).await;
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(!dir.path().join("absent.db").exists());
    }

    #[tokio::test]
    async fn existing_database_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.db");
        SqliteIdentityStore::open(config_with_db(&path).storage)
            .await
            .unwrap();

        let result = check_database(&config_with_db(&path)).await;
        assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
        assert!(result.message.contains("0 people"));
    }

    #[tokio::test]
    async fn configured_api_key_passes() {
        let mut config = RecallConfig::default();
        config.anthropic.api_key = Some("sk-ant-test".into());
        assert_eq!(check_api_key(&config).await.status, CheckStatus::Pass);
    }

    #[test]
    fn plain_output_uses_tags() {
        let result = CheckResult {
            name: "Database".into(),
            status: CheckStatus::Fail,
            message: "locked".into(),
            duration: Duration::from_millis(3),
        };
        let line = format_result(&result, false);
        assert!(line.starts_with("    [FAIL] Database"));
        assert!(line.ends_with("locked (3ms)"));
    }
}
