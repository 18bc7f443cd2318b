//! Diet & Exercise Planner CLI
//!
//! A command-line tool for computing personalized plans, downloading
//! plain-text reports, and checking the health of the planner service.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{plan, report, status};

/// Diet & Exercise Planner CLI
#[derive(Parser)]
#[command(name = "dxp")]
#[command(author, version, about = "CLI for the Diet & Exercise Planner", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via DXP_API_URL env var)
    #[arg(long, env = "DXP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Profile fields shared by the plan and report subcommands
#[derive(Args)]
pub struct ProfileArgs {
    /// Gender ("Male" or "Female")
    #[arg(long)]
    pub gender: String,

    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Height in centimeters
    #[arg(long)]
    pub height_cm: f64,

    /// Weight in kilograms
    #[arg(long)]
    pub weight_kg: f64,

    /// Activity level (Low, Medium, High)
    #[arg(long, default_value = "Low")]
    pub activity: String,

    /// Goal ("Lose Weight", "Maintain", "Gain Weight")
    #[arg(long, default_value = "Maintain")]
    pub goal: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a personalized diet and exercise plan
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Download the plain-text plan report
    Report {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Output file path (prints to stdout if not specified)
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Show server and model health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Plan { profile } => {
            plan::compute_plan(&client, &profile, cli.format).await?;
        }
        Commands::Report { profile, output } => {
            report::fetch_report(&client, &profile, output).await?;
        }
        Commands::Status => {
            status::show_status(&client, cli.format).await?;
        }
    }

    Ok(())
}
