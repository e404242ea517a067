use crate::core::models::ScheduledMaintenance;
use crate::statuspage::StatuspageClient;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceFilter {
    All,
    Active,
    Upcoming,
}

pub async fn run(page_id: &str, json: bool, filter: MaintenanceFilter) -> Result<()> {
    let client = StatuspageClient::new(page_id)?;

    let maintenances: Vec<ScheduledMaintenance> = match filter {
        MaintenanceFilter::All => {
            client
                .all_scheduled_maintenances()
                .await
                .context("Failed to fetch scheduled maintenances")?
                .scheduled_maintenances
        }
        MaintenanceFilter::Active => {
            client
                .active_scheduled_maintenances()
                .await
                .context("Failed to fetch active maintenances")?
                .scheduled_maintenances
        }
        MaintenanceFilter::Upcoming => {
            client
                .upcoming_scheduled_maintenances()
                .await
                .context("Failed to fetch upcoming maintenances")?
                .scheduled_maintenances
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&maintenances)?);
        return Ok(());
    }

    if maintenances.is_empty() {
        println!("No scheduled maintenances.");
        return Ok(());
    }

    for maintenance in &maintenances {
        println!(
            "{} → {}  [{}] {}",
            maintenance.scheduled_for.format("%Y-%m-%d %H:%M"),
            maintenance.scheduled_until.format("%Y-%m-%d %H:%M"),
            maintenance.incident.status.as_str(),
            maintenance.incident.name
        );
    }

    Ok(())
}
