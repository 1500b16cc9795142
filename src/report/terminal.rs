use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::model::Status;
use crate::report::result::{FeatureSummary, ReportResult};

fn status_cell(status: Status) -> Cell {
    let color = match status {
        Status::Passed => Color::Green,
        Status::Skipped => Color::Yellow,
        _ => Color::Red,
    };
    Cell::new(status.as_str().to_uppercase()).fg(color)
}

/// Per-feature breakdown of the merged report
pub fn feature_table(features: &[FeatureSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Feature", "Scenarios", "Passed", "Failed", "Skipped", "Steps", "Status"]);

    for f in features {
        table.add_row(vec![
            Cell::new(&f.name),
            Cell::new(f.scenarios.total),
            Cell::new(f.scenarios.passed),
            Cell::new(f.scenarios.failed),
            Cell::new(f.scenarios.skipped),
            Cell::new(f.steps.total),
            status_cell(f.status),
        ]);
    }
    table
}

/// Render a merged report to the terminal with colors
pub fn render(report: &ReportResult) {
    let summary = report.summary();

    println!();
    println!(
        "{}  cukemerge v{} — {} features merged with '{}' in {:.2}s of test time",
        "🥒".bold(),
        env!("CARGO_PKG_VERSION"),
        summary.features,
        report.reducing_method(),
        summary.duration_ns as f64 / 1_000_000_000.0
    );
    println!();

    if report.features().is_empty() {
        println!("  {}  Nothing to report", "∅".dimmed());
        println!();
        return;
    }

    println!("{}", feature_table(report.feature_summaries()));

    // Failed scenarios, with the first failing step
    for feature in report.features() {
        for scenario in feature.scenarios().iter().filter(|s| s.status().is_failing()) {
            println!(
                "  {}  {} › {}",
                " FAILED ".on_red().white().bold(),
                feature.name().dimmed(),
                scenario.name().bold()
            );
            if let Some(step) = scenario.all_steps().find(|s| s.status.is_failing()) {
                println!(
                    "           → {}{} ({})",
                    step.keyword.dimmed(),
                    step.name,
                    step.status
                );
                if let Some(msg) = step.error_message.as_deref().and_then(|m| m.lines().next()) {
                    println!("             {}", msg.red());
                }
            }
        }
    }

    println!("{}", "━".repeat(60));

    let scenarios = &summary.scenarios;
    let mut parts = vec![format!("{} passed", scenarios.passed).green().to_string()];
    if scenarios.failed > 0 {
        parts.push(format!("{} failed", scenarios.failed).red().bold().to_string());
    }
    if scenarios.skipped > 0 {
        parts.push(format!("{} skipped", scenarios.skipped).yellow().to_string());
    }

    println!(
        " {} scenarios: {}",
        scenarios.total.to_string().bold(),
        parts.join(", ")
    );
    println!(
        " {} steps ({} failed, {} skipped, {} undefined)",
        summary.steps.total,
        summary.steps.failed,
        summary.steps.skipped,
        summary.steps.undefined
    );
    println!(" fingerprint {}", (&report.fingerprint()[..12]).dimmed());
    println!("{}", "━".repeat(60));
    println!();
}
