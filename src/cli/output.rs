//! Formatted terminal rendering of assessment reports.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use console::{style, StyledObject};

use crate::domain::models::{Rating, Report};

/// Rating colors: green for 4-5, yellow for 3, red below.
fn styled_rating(rating: Rating) -> StyledObject<String> {
    let text = rating.to_string();
    match rating.get() {
        4..=5 => style(text).green().bold(),
        3 => style(text).yellow().bold(),
        _ => style(text).red().bold(),
    }
}

/// Render a full report to stdout.
pub fn render_report(report: &Report) {
    println!();
    println!("{}", style("Control Effectiveness Assessment").bold().underlined());
    println!("run {}  status: {}", report.run_id, report.status);

    if let Some(message) = report.error.as_available() {
        println!();
        println!("{} {message}", style("failed:").red().bold());
    }

    if let Some(rating) = report.rating.as_available() {
        println!();
        println!("Initial rating: {}", styled_rating(*rating));
    }
    if let Some(assessment) = report.assessment_learned.as_available() {
        println!("{assessment}");
    }

    if let Some(metrics) = report.metrics_evaluation.as_available() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Criterion", "Score", "Rationale"]);
        for (name, criterion) in metrics.iter() {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(criterion.score.get()),
                Cell::new(&criterion.rationale),
            ]);
        }
        println!();
        println!("{table}");
    }

    if let Some(reflection) = report.reflection.as_available() {
        println!();
        println!("{}", style("Self-reflection").bold());
        println!("{reflection}");
    }

    if let Some(final_rating) = report.final_rating.as_available() {
        println!();
        println!("Final rating: {}", styled_rating(*final_rating));
    }
    if let Some(final_assessment) = report.final_assessment.as_available() {
        println!("{final_assessment}");
    }

    if let Some(delta) = report.rating_delta.as_available() {
        let line = match delta.signum() {
            1 => format!("Improved by {delta} after self-reflection"),
            -1 => format!("Reduced by {} after self-reflection", delta.abs()),
            _ => "Unchanged after self-reflection".to_string(),
        };
        println!();
        println!("{}", style(line).dim());
    }
}
