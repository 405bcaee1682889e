//! `copilot draft check`: validate a saved draft file.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use copilot_core::wizard::state::ChallengeDraftExt;
use copilot_core::wizard::validation::validate_draft;
use copilot_types::challenge::{ChallengeDraft, SectionKey};

/// Load a draft from JSON and print its validation warnings.
///
/// Warnings are informational; the command succeeds even when some are found.
pub async fn check_draft(file: &Path, json: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read draft file {}", file.display()))?;
    let draft: ChallengeDraft = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid challenge draft", file.display()))?;

    let warnings = validate_draft(&draft);

    if json {
        let views: Vec<_> = warnings
            .iter()
            .map(|w| serde_json::json!({ "code": w.code(), "message": w.to_string() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "sections": draft.completed_sections(),
                "warnings": views,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {}", style("Challenge draft").bold());
    println!();
    let completed = draft.completed_sections();
    for key in SectionKey::ALL {
        let done = completed.contains(&key);
        let marker = if done {
            style("+").green().bold()
        } else {
            style("-").dim()
        };
        println!("  {marker} {}", key.title());
    }
    println!();

    if warnings.is_empty() {
        println!("  {} No warnings.", style("*").green().bold());
    } else {
        for warning in &warnings {
            println!("  {} {warning}", style("!").yellow().bold());
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_draft_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        tokio::fs::write(&path, "{\"prizes\": {\"budget\": 10}}").await.unwrap();

        let err = check_draft(&path, true).await.unwrap_err();
        assert!(err.to_string().contains("not a valid challenge draft"));
    }

    #[tokio::test]
    async fn test_check_draft_accepts_empty_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        tokio::fs::write(&path, "{}").await.unwrap();

        check_draft(&path, true).await.unwrap();
    }
}
