//! Server health command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, HealthResponse};
use crate::output::{color_status, print_warning, OutputFormat};

/// Row for the component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Checked")]
    checked: String,
}

/// Show server and model health
pub async fn show_status(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: HealthResponse = client.get_any_status("healthz").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Server Status".bold());
            println!("{}", "=".repeat(50));
            println!("Status:                 {}", color_status(&result.status));
            println!();

            if result.components.is_empty() {
                print_warning("No component detail reported");
                return Ok(());
            }

            println!("{}", "Components".bold());
            println!("{}", "-".repeat(50));

            let mut rows: Vec<ComponentRow> = result
                .components
                .iter()
                .map(|(name, health)| ComponentRow {
                    component: name.clone(),
                    status: color_status(&health.status),
                    message: health.message.clone().unwrap_or_default(),
                    checked: format_timestamp(health.last_check_timestamp),
                })
                .collect();
            rows.sort_by(|a, b| a.component.cmp(&b.component));

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            if result.status != "healthy" {
                println!();
                print_warning("One or more components need attention");
            }
        }
    }

    Ok(())
}

/// Format a unix timestamp for display
fn format_timestamp(ts: i64) -> String {
    match chrono::DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}
