//! `solace check` -- verify the configured backend answers.

use console::style;
use serde_json::json;

use solace_core::llm::generator::ReplyGenerator;
use solace_infra::filesystem::config_path;
use solace_infra::llm::check_connection;

use crate::state::AppState;

use super::thinking_spinner;

pub async fn check(state: &AppState, json: bool) -> anyhow::Result<()> {
    let generator = state.generator.as_ref();
    let name = ReplyGenerator::name(generator);
    let model = ReplyGenerator::model(generator);

    let spinner = (!json).then(|| thinking_spinner(&format!("contacting {name}...")));
    let result = check_connection(generator).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json {
        let out = json!({
            "backend": name,
            "model": model,
            "config": config_path(&state.data_dir).display().to_string(),
            "healthy": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!(
            "  {}  {} ({})",
            style("Backend:").bold(),
            style(name).cyan(),
            style(model).dim()
        );
        println!(
            "  {}   {}",
            style("Config:").bold(),
            style(config_path(&state.data_dir).display()).dim()
        );
        match &result {
            Ok(_) => println!("  {} Backend responded", style("✓").green()),
            Err(e) => println!("  {} {e}", style("✗").red()),
        }
        println!();
    }

    result.map(|_| ()).map_err(|e| anyhow::anyhow!("connection check failed: {e}"))
}
