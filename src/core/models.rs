use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    None,
    Minor,
    Major,
    Critical,
}

impl Indicator {
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::None => "none",
            Indicator::Minor => "minor",
            Indicator::Major => "major",
            Indicator::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Postmortem,
    // maintenance lifecycle shares the incident shape
    Scheduled,
    InProgress,
    Verifying,
    Completed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Identified => "identified",
            IncidentStatus::Monitoring => "monitoring",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Postmortem => "postmortem",
            IncidentStatus::Scheduled => "scheduled",
            IncidentStatus::InProgress => "in progress",
            IncidentStatus::Verifying => "verifying",
            IncidentStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
}

/// Basic page info present on every statuspage.io response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStatusInfo {
    pub description: String,
    pub indicator: Indicator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub status: ComponentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub position: i32,
    pub description: Option<String>,
    pub showcase: bool,
    pub start_date: Option<NaiveDate>,
    pub group_id: Option<String>,
    pub page_id: String,
    pub group: bool,
    pub only_show_if_degraded: bool,
    #[serde(default)]
    pub components: Option<Vec<String>>,
}

/// One update posted to an incident. The feed lists these newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub id: String,
    pub incident_id: String,
    pub body: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
    // the feed occasionally omits this on fresh updates
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An incident with its update timeline, newest update first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    pub impact: Indicator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub monitoring_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub shortlink: String,
    pub page_id: String,
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
}

impl Incident {
    pub fn latest_update(&self) -> Option<&IncidentUpdate> {
        self.incident_updates.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMaintenance {
    #[serde(flatten)]
    pub incident: Incident,
    pub scheduled_for: DateTime<Utc>,
    pub scheduled_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub page: Page,
    pub status: PageStatusInfo,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStatus {
    pub page: Page,
    pub status: PageStatusInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageComponents {
    pub page: Page,
    pub components: Vec<Component>,
}

/// Incident listing, newest incident first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllIncidents {
    pub page: Page,
    pub incidents: Vec<Incident>,
}

impl AllIncidents {
    /// The newest update of the newest incident, if any.
    pub fn latest_update(&self) -> Option<&IncidentUpdate> {
        self.incidents.first().and_then(|i| i.latest_update())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedIncidents {
    pub page: Page,
    pub incidents: Vec<Incident>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllScheduledMaintenances {
    pub page: Page,
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveScheduledMaintenances {
    pub page: Page,
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingScheduledMaintenances {
    pub page: Page,
    pub scheduled_maintenances: Vec<ScheduledMaintenance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCIDENTS_JSON: &str = r#"{
        "page": {
            "id": "kctbh9vrtdwd",
            "name": "GitHub",
            "url": "https://www.githubstatus.com",
            "updated_at": "2024-03-01T12:00:00.000Z"
        },
        "incidents": [
            {
                "id": "inc1",
                "name": "Elevated error rates",
                "status": "investigating",
                "impact": "major",
                "created_at": "2024-03-01T11:00:00.000Z",
                "updated_at": "2024-03-01T11:30:00.000Z",
                "monitoring_at": null,
                "resolved_at": null,
                "shortlink": "https://stspg.io/abc",
                "page_id": "kctbh9vrtdwd",
                "incident_updates": [
                    {
                        "id": "upd2",
                        "incident_id": "inc1",
                        "body": "We are continuing to investigate.",
                        "status": "investigating",
                        "created_at": "2024-03-01T11:30:00.000Z",
                        "display_at": "2024-03-01T11:30:00.000Z",
                        "updated_at": "2024-03-01T11:30:00.000Z"
                    },
                    {
                        "id": "upd1",
                        "incident_id": "inc1",
                        "body": "We are investigating elevated error rates.",
                        "status": "investigating",
                        "created_at": "2024-03-01T11:00:00.000Z",
                        "display_at": "2024-03-01T11:00:00.000Z",
                        "updated_at": "2024-03-01T11:00:00.000Z"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_decode_incidents_response() {
        let all: AllIncidents = serde_json::from_str(INCIDENTS_JSON).unwrap();

        assert_eq!(all.page.id, "kctbh9vrtdwd");
        assert_eq!(all.incidents.len(), 1);

        let incident = &all.incidents[0];
        assert_eq!(incident.status, IncidentStatus::Investigating);
        assert_eq!(incident.impact, Indicator::Major);
        assert_eq!(incident.incident_updates.len(), 2);
    }

    #[test]
    fn test_latest_update_is_first_entry() {
        let all: AllIncidents = serde_json::from_str(INCIDENTS_JSON).unwrap();

        let latest = all.latest_update().unwrap();
        assert_eq!(latest.id, "upd2");
        assert!(latest.updated_at.is_some());
    }

    #[test]
    fn test_latest_update_empty_listing() {
        let mut all: AllIncidents = serde_json::from_str(INCIDENTS_JSON).unwrap();
        all.incidents.clear();

        assert!(all.latest_update().is_none());
    }

    #[test]
    fn test_update_missing_updated_at() {
        let json = r#"{
            "id": "upd1",
            "incident_id": "inc1",
            "body": "Investigating.",
            "status": "investigating",
            "created_at": "2024-03-01T11:00:00.000Z",
            "display_at": "2024-03-01T11:00:00.000Z"
        }"#;

        let update: IncidentUpdate = serde_json::from_str(json).unwrap();
        assert!(update.updated_at.is_none());
    }

    #[test]
    fn test_status_enums_snake_case() {
        let status: IncidentStatus = serde_json::from_str("\"postmortem\"").unwrap();
        assert_eq!(status, IncidentStatus::Postmortem);

        let component: ComponentStatus =
            serde_json::from_str("\"degraded_performance\"").unwrap();
        assert_eq!(component, ComponentStatus::DegradedPerformance);

        let indicator: Indicator = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(indicator, Indicator::Critical);
        assert_eq!(indicator.label(), "critical");
    }

    #[test]
    fn test_decode_scheduled_maintenance() {
        let json = r#"{
            "id": "mt1",
            "name": "Database upgrade",
            "status": "scheduled",
            "impact": "minor",
            "created_at": "2024-03-01T09:00:00.000Z",
            "updated_at": "2024-03-01T09:00:00.000Z",
            "monitoring_at": null,
            "resolved_at": null,
            "shortlink": "https://stspg.io/mt1",
            "page_id": "kctbh9vrtdwd",
            "incident_updates": [],
            "scheduled_for": "2024-03-02T02:00:00.000Z",
            "scheduled_until": "2024-03-02T04:00:00.000Z"
        }"#;

        let maintenance: ScheduledMaintenance = serde_json::from_str(json).unwrap();
        assert_eq!(maintenance.incident.status, IncidentStatus::Scheduled);
        assert!(maintenance.scheduled_until > maintenance.scheduled_for);
    }
}
