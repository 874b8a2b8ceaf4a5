//! Formatting for health reports

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckOutcome;
use super::registry::HealthReport;

/// Formats a health report as a pretty table
pub fn format_report(report: &HealthReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Check", "Outcome", "Duration", "Detail"]);

    for record in &report.records {
        let duration_str = format!("{:.2?}", record.duration);
        let detail = match &record.outcome {
            CheckOutcome::Failed(reason) => reason.as_str(),
            _ => "",
        };
        builder.push_record([
            record.name.as_str(),
            &record.outcome.as_colored_str(),
            &duration_str,
            detail,
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = String::new();
    output.push_str(&table.to_string());
    output.push('\n');

    output.push_str(&format_summary(report));

    output
}

fn format_summary(report: &HealthReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Healthy: {}\n", "✓".green(), report.healthy));

    if report.unhealthy > 0 {
        summary.push_str(&format!(
            "  {} Unhealthy: {}\n",
            "✗".red(),
            report.unhealthy
        ));
    }

    summary.push('\n');
    summary.push_str(&format!(
        "  Overall: {}\n",
        report.status().as_colored_str()
    ));

    summary
}

/// Prints a health report to stdout
pub fn print_report(report: &HealthReport) {
    println!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthRegistry;

    #[test]
    fn test_format_report_lists_checks() {
        colored::control::set_override(false);

        let registry = HealthRegistry::new();
        registry.register_named("database", || true);
        registry.register_named("queue", || -> anyhow::Result<bool> {
            anyhow::bail!("broker unreachable")
        });

        let output = format_report(&registry.run());
        assert!(output.contains("database"));
        assert!(output.contains("queue"));
        assert!(output.contains("broker unreachable"));
        assert!(output.contains("Total checks: 2"));
        assert!(output.contains("Overall: DEGRADED"));
    }
}
