use crate::core::models::Incident;
use crate::statuspage::StatuspageClient;
use anyhow::{Context, Result};

pub async fn run(page_id: &str, json: bool, unresolved: bool, limit: usize) -> Result<()> {
    let client = StatuspageClient::new(page_id)?;

    let incidents = if unresolved {
        client
            .unresolved_incidents()
            .await
            .context("Failed to fetch unresolved incidents")?
            .incidents
    } else {
        client
            .all_incidents()
            .await
            .context("Failed to fetch incidents")?
            .incidents
    };

    let incidents: Vec<Incident> = incidents.into_iter().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&incidents)?);
        return Ok(());
    }

    if incidents.is_empty() {
        println!("No incidents.");
        return Ok(());
    }

    for incident in &incidents {
        println!(
            "{}  {:<8} [{}] {}",
            incident.created_at.format("%Y-%m-%d"),
            incident.impact.label(),
            incident.status.as_str(),
            incident.name
        );

        if let Some(update) = incident.latest_update() {
            println!("    {}", first_line(&update.body));
        }
    }

    Ok(())
}

fn first_line(body: &str) -> &str {
    body.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line("single"), "single");
        assert_eq!(first_line(""), "");
    }
}
