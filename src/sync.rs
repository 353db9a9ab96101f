use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::fs::{atomic_write, remove_if_exists};
use crate::stats::{decide, is_valid_code, normalize_code};
use crate::transifex::TransifexClient;
use crate::valid_langs::{self, AcceptedLanguages};

/// Outcome of a sync run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Languages written to the valid-langs file
    pub accepted: AcceptedLanguages,
    /// Languages whose translation file was (re)written
    pub updated: Vec<String>,
    /// Languages below the completion threshold
    pub skipped: Vec<String>,
    /// Languages whose stale translation file was deleted
    pub removed: Vec<String>,
}

/// Download every sufficiently complete translation and refresh the valid-langs file
pub async fn run(config: &Config, client: &TransifexClient) -> Result<SyncReport> {
    let previous = valid_langs::load(&config.valid_langs_file)?;
    info!(
        "Loaded {} previously accepted languages: {:?}",
        previous.len(),
        previous.iter().collect::<Vec<_>>()
    );

    let stats = client.fetch_stats().await?;
    info!("Fetched stats for {} languages", stats.len());

    let mut report = SyncReport::default();

    for (raw_code, stat) in &stats {
        let code = normalize_code(raw_code);
        if !is_valid_code(&code) {
            warn!("Ignoring language with unusable code {:?}", raw_code);
            continue;
        }

        // An alias that normalized to the same code was already accepted
        if report.accepted.contains(&code) {
            warn!("Duplicate language {:?} after normalization", code);
            continue;
        }

        let pct = stat.completion_percentage();
        if !decide(pct, previous.contains(&code)).is_included() {
            info!("Skipping language {:?} (too low completion ratio {}%)", code, pct);
            report.skipped.push(code.clone());

            let lang_file = config.lang_file(&code);
            match remove_if_exists(&lang_file) {
                Ok(true) => {
                    info!("Removed {}", lang_file.display());
                    report.removed.push(code);
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to remove {}: {}", lang_file.display(), e),
            }
            continue;
        }

        report.accepted.insert(code.clone());

        if code == config.base_language {
            continue;
        }

        info!("Updating language {:?} ({}%)", code, pct);
        let content = client.fetch_translation(&code).await?;
        let lang_file = config.lang_file(&code);
        atomic_write(&lang_file, &content)
            .with_context(|| format!("Failed to save translation for {:?}", code))?;
        report.updated.push(code);
    }

    valid_langs::save(&config.valid_langs_file, &report.accepted)?;
    info!(
        "Saved {} accepted languages to {}",
        report.accepted.len(),
        config.valid_langs_file.display()
    );

    Ok(report)
}
