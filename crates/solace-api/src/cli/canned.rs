//! One-shot `solace affirm` and `solace meditate`.

use console::style;
use serde_json::json;

use solace_core::chat::session::CannedText;

use crate::state::AppState;

use super::thinking_spinner;

pub async fn affirm(state: &AppState, json: bool) -> anyhow::Result<()> {
    let session = state.detached_session();
    let spinner = (!json).then(|| thinking_spinner("finding the right words..."));
    let canned = session.generate_affirmation().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    print_canned("Affirmation", &canned, json)
}

pub async fn meditate(state: &AppState, json: bool) -> anyhow::Result<()> {
    let session = state.detached_session();
    let spinner = (!json).then(|| thinking_spinner("preparing your meditation..."));
    let canned = session.generate_meditation_guide().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    print_canned("Guided meditation", &canned, json)
}

/// Print generated text (or its fallback) with an inline notice on failure.
pub(crate) fn print_canned(heading: &str, canned: &CannedText, json: bool) -> anyhow::Result<()> {
    if json {
        let out = json!({
            "text": canned.text,
            "notice": canned.failure.as_ref().map(|f| f.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    if let Some(failure) = &canned.failure {
        println!("  {} {failure}", style("!").red().bold());
    }
    println!("  {}", style(heading).magenta().bold());
    println!();
    for line in canned.text.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
