//! Calendar events (fittings, deliveries, appointments).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Fitting,
    Delivery,
    Appointment,
    #[default]
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Fitting => "Fitting",
            EventType::Delivery => "Delivery",
            EventType::Appointment => "Appointment",
            EventType::Other => "Other",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fitting" => Ok(EventType::Fitting),
            "delivery" => Ok(EventType::Delivery),
            "appointment" => Ok(EventType::Appointment),
            "other" => Ok(EventType::Other),
            other => Err(format!(
                "Unknown event type: '{}'. Valid options: fitting, delivery, appointment, other",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(deserialize_with = "crate::dates::deserialize_datetime")]
    #[ts(as = "String")]
    pub start: DateTime<Utc>,

    #[serde(default, deserialize_with = "crate::dates::deserialize_optional_datetime")]
    #[ts(as = "Option<String>")]
    pub end: Option<DateTime<Utc>>,

    #[serde(rename = "type", default)]
    pub event_type: EventType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CalendarEvent {
    /// True when the event overlaps `[from, to)`.
    pub fn falls_within(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        let end = self.end.unwrap_or(self.start);
        self.start < to && end >= from
    }
}
