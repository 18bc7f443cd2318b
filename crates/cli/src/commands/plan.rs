//! Plan computation command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, PlanResponse};
use crate::output::{color_bmi, OutputFormat};
use crate::ProfileArgs;

/// Row for the macro targets table
#[derive(Tabled)]
struct MacroRow {
    #[tabled(rename = "Macro")]
    name: String,
    #[tabled(rename = "Grams/day")]
    grams: String,
}

/// Compute and display a personalized plan
pub async fn compute_plan(
    client: &ApiClient,
    profile: &ProfileArgs,
    format: OutputFormat,
) -> Result<()> {
    let request = super::plan_request(profile);
    let result: PlanResponse = client.post("predict", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Personalized Plan".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Profile:                {} ({} y, {} cm, {} kg)",
                request.gender.cyan(),
                request.age,
                request.height_cm,
                request.weight_kg
            );
            println!("BMI:                    {}", color_bmi(result.bmi));
            println!("Diet style:             {}", result.diet_style.cyan());
            println!(
                "Calorie range:          {} - {} kcal",
                result.calorie_range.low, result.calorie_range.high
            );
            println!(
                "BMR / TDEE:             {} / {} kcal",
                result.raw.bmr, result.raw.tdee
            );
            println!();

            println!("{}", "Daily Macro Targets".bold());
            println!("{}", "-".repeat(50));
            let rows = vec![
                MacroRow {
                    name: "Protein".to_string(),
                    grams: format!("{} g", result.macros_g.protein_g),
                },
                MacroRow {
                    name: "Carbs".to_string(),
                    grams: format!("{} g", result.macros_g.carbs_g),
                },
                MacroRow {
                    name: "Fats".to_string(),
                    grams: format!("{} g", result.macros_g.fats_g),
                },
            ];
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!();

            println!("{}", "Meal Suggestions".bold());
            println!("{}", "-".repeat(50));
            for meal in &result.meal_suggestions {
                println!("- {}", meal);
            }
            println!();

            println!("{}", "Exercise Suggestions".bold());
            println!("{}", "-".repeat(50));
            for exercise in &result.exercise_suggestions {
                println!("- {}", exercise);
            }
            println!();
            println!("{}", result.exercise_note.dimmed());
        }
    }

    Ok(())
}
