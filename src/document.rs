// sprinkler-console/src/document.rs

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::Result;

/// Wire form of the controller's configuration document, exactly as it
/// travels over GET/PUT. Event times are millisecond offsets from midnight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Configuration {
    pub enabled: bool,
    pub overwrite: bool,
    pub schedule: Schedule,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Schedule {
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Event {
    pub from: i64,
    pub to: i64,
}

/// Edit form of the same document: what the operator actually types into.
/// Times are `HH:MM:SS` strings and stay unvalidated until they are turned
/// back into wire milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Draft {
    pub enabled: bool,
    pub overwrite: bool,
    pub schedule: DraftSchedule,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DraftSchedule {
    pub events: Vec<DraftEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DraftEvent {
    pub from: String,
    pub to: String,
}

impl DraftEvent {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

impl Draft {
    /// Renders a wire document's times as editable clock strings. Infallible:
    /// every millisecond offset has a clock rendering.
    pub fn from_wire(wire: &Configuration) -> Self {
        Self {
            enabled: wire.enabled,
            overwrite: wire.overwrite,
            schedule: DraftSchedule {
                events: wire
                    .schedule
                    .events
                    .iter()
                    .map(|event| DraftEvent {
                        from: clock::encode(event.from),
                        to: clock::encode(event.to),
                    })
                    .collect(),
            },
        }
    }

    /// Parses the draft back into wire milliseconds, building a fresh
    /// document and leaving `self` untouched. Hand-edited times that do not
    /// parse surface here as invalid-time-format errors.
    pub fn to_wire(&self) -> Result<Configuration> {
        let mut events = Vec::with_capacity(self.schedule.events.len());
        for event in &self.schedule.events {
            events.push(Event {
                from: clock::decode(&event.from)?,
                to: clock::decode(&event.to)?,
            });
        }
        Ok(Configuration {
            enabled: self.enabled,
            overwrite: self.overwrite,
            schedule: Schedule { events },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_sample() -> Configuration {
        Configuration {
            enabled: false,
            overwrite: false,
            schedule: Schedule {
                events: vec![Event { from: 36_000_000, to: 37_800_000 }],
            },
        }
    }

    #[test]
    fn wire_json_shape_is_stable() {
        let json = serde_json::to_value(wire_sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "enabled": false,
                "overwrite": false,
                "schedule": { "events": [ { "from": 36_000_000, "to": 37_800_000 } ] }
            })
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Configuration = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Configuration::default());
        let parsed: Configuration = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(parsed.enabled);
        assert!(parsed.schedule.events.is_empty());
    }

    #[test]
    fn drafts_render_wire_times_as_clock_strings() {
        let draft = Draft::from_wire(&wire_sample());
        assert_eq!(draft.schedule.events[0].from, "10:00:00");
        assert_eq!(draft.schedule.events[0].to, "10:30:00");
    }

    #[test]
    fn drafts_parse_back_into_wire_milliseconds() {
        let mut draft = Draft::from_wire(&wire_sample());
        draft.schedule.events.push(DraftEvent::new("10:00:00", "10:00:30"));
        let wire = draft.to_wire().unwrap();
        assert_eq!(wire.schedule.events[0], Event { from: 36_000_000, to: 37_800_000 });
        assert_eq!(wire.schedule.events[1], Event { from: 36_000_000, to: 36_030_000 });
    }

    #[test]
    fn hand_edited_garbage_fails_to_parse() {
        let mut draft = Draft::from_wire(&wire_sample());
        draft.schedule.events[0].to = "soon".into();
        assert!(draft.to_wire().is_err());
    }
}
