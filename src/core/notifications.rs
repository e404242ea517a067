use crate::core::models::Incident;
use anyhow::Result;
use notify_rust::Notification;

const BODY_PREVIEW_CHARS: usize = 200;

pub fn send_incident_notification(page_name: &str, incident: &Incident) -> Result<()> {
    let detail = match incident.latest_update() {
        Some(update) => format!("[{}] {}", update.status.as_str(), preview(&update.body)),
        None => incident.status.as_str().to_string(),
    };

    Notification::new()
        .summary(&format!("{}: {}", page_name, incident.name))
        .body(&detail)
        .appname("statuswatch")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show()?;

    tracing::info!(
        incident_id = %incident.id,
        incident = %incident.name,
        "Sent incident update notification"
    );

    Ok(())
}

fn preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        return body.to_string();
    }

    let truncated: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_body_unchanged() {
        assert_eq!(preview("all clear"), "all clear");
    }

    #[test]
    fn test_preview_long_body_truncated() {
        let body = "x".repeat(500);
        let result = preview(&body);

        assert!(result.chars().count() <= BODY_PREVIEW_CHARS + 1);
        assert!(result.ends_with('…'));
    }
}
