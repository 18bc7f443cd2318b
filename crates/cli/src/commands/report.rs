//! Report download command

use anyhow::Result;

use crate::client::ApiClient;
use crate::output::print_success;
use crate::ProfileArgs;

/// Fetch the plain-text report and print it or save it to a file
pub async fn fetch_report(
    client: &ApiClient,
    profile: &ProfileArgs,
    output: Option<String>,
) -> Result<()> {
    let request = super::plan_request(profile);
    let text = client.post_text("report", &request).await?;

    if let Some(output_path) = output {
        std::fs::write(&output_path, &text)?;
        print_success(&format!("Report saved to {}", output_path));
    } else {
        println!("{}", text);
    }

    Ok(())
}
