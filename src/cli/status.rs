use crate::core::models::{ComponentStatus, Summary};
use crate::statuspage::StatuspageClient;
use anyhow::{Context, Result};

pub async fn run(page_id: &str, json: bool) -> Result<()> {
    let client = StatuspageClient::new(page_id)?;
    let summary = client
        .summary()
        .await
        .context("Failed to fetch page summary")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_text_output(&summary);
    Ok(())
}

fn print_text_output(summary: &Summary) {
    println!(
        "{} — {}",
        summary.page.name, summary.status.description
    );
    println!("  impact: {}", summary.status.indicator.label());

    if !summary.components.is_empty() {
        println!();
        for component in &summary.components {
            println!(
                "  {:<32} {}",
                component.name,
                component_label(component.status)
            );
        }
    }

    if !summary.incidents.is_empty() {
        println!();
        println!("  {} unresolved incident(s):", summary.incidents.len());
        for incident in &summary.incidents {
            println!("    [{}] {}", incident.status.as_str(), incident.name);
        }
    }
}

fn component_label(status: ComponentStatus) -> &'static str {
    match status {
        ComponentStatus::Operational => "operational",
        ComponentStatus::DegradedPerformance => "degraded performance",
        ComponentStatus::PartialOutage => "partial outage",
        ComponentStatus::MajorOutage => "major outage",
        ComponentStatus::UnderMaintenance => "under maintenance",
    }
}
