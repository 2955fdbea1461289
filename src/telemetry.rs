use log::Level;
use serde_json::{Map, Number, Value};

use crate::clock::{self, Timestamp};

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

/// One structured event: `ts`, `level`, `event`, then `fields` flattened in.
pub fn event_payload(ts: Timestamp, level: Level, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert(
        "ts".to_string(),
        Number::from_f64(ts.as_millis().floor())
            .map(Value::Number)
            .unwrap_or(Value::Null),
    );
    payload.insert("level".to_string(), Value::String(level_name(level).to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

pub fn log_event(level: Level, event: &str, fields: Value) {
    if level > log::max_level() {
        return;
    }
    let payload = event_payload(clock::now_unix_millis(), level, event, fields);
    log::log!(target: "motion_portfolio", level, "{payload}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_flattens_fields_after_header() {
        let payload = event_payload(
            Timestamp::from_millis(1_700_000_000_123.9),
            Level::Info,
            "reveal_played",
            json!({ "section": "about", "group": "text" }),
        );

        assert_eq!(
            payload,
            json!({
                "ts": 1_700_000_000_123.0,
                "level": "info",
                "event": "reveal_played",
                "section": "about",
                "group": "text",
            })
        );
    }

    #[test]
    fn non_object_fields_are_dropped() {
        let payload = event_payload(Timestamp::ZERO, Level::Warn, "config_rejected", json!("oops"));

        assert_eq!(payload["level"], "warn");
        assert!(payload.get("oops").is_none());
        assert_eq!(payload.as_object().map(|fields| fields.len()), Some(3));
    }
}
