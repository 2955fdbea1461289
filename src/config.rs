use std::time::Duration;

use log::Level;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::contact::ContactTimings;
use crate::cursor::{CursorConfig, TrailMode};

pub const CONFIG_ELEMENT_ID: &str = "motion-config";

const DEFAULT_CURSOR_TRAIL_MS: u64 = 100;
const DEFAULT_SUBMIT_LATENCY_MS: u64 = 1_500;
const DEFAULT_NOTICE_DURATION_MS: u64 = 3_000;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
const DEFAULT_LOG_LEVEL: Level = Level::Info;

const CURSOR_TRAIL_MS_BOUNDS: (u64, u64) = (0, 1_000);
const SUBMIT_LATENCY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const NOTICE_DURATION_MS_BOUNDS: (u64, u64) = (500, 30_000);
const FRAME_INTERVAL_MS_BOUNDS: (u64, u64) = (8, 100);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("motion config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The embedded config as written. Every key is optional, and values are
/// kept untyped so one mistyped key falls back alone.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    cursor_trail_ms: Option<Value>,
    cursor_trail_mode: Option<Value>,
    submit_latency_ms: Option<Value>,
    notice_duration_ms: Option<Value>,
    frame_interval_ms: Option<Value>,
    reduced_motion: Option<Value>,
    log_level: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub cursor: CursorConfig,
    pub contact: ContactTimings,
    pub frame_interval: Duration,
    /// Forces reduced motion on or off; `None` defers to the user's system setting.
    pub reduced_motion: Option<bool>,
    pub log_level: Level,
    /// Keys whose values were out of range or unrecognised and fell back to defaults.
    pub rejected: Vec<&'static str>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            cursor: CursorConfig::default(),
            contact: ContactTimings::default(),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            reduced_motion: None,
            log_level: DEFAULT_LOG_LEVEL,
            rejected: Vec::new(),
        }
    }
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: RawConfig = serde_json::from_str(raw)?;
        Ok(Self::resolve(parsed))
    }

    fn resolve(raw: RawConfig) -> Self {
        let mut rejected = Vec::new();

        let cursor_trail_ms = parse_u64_with_bounds(
            "cursor_trail_ms",
            raw.cursor_trail_ms.as_ref(),
            DEFAULT_CURSOR_TRAIL_MS,
            CURSOR_TRAIL_MS_BOUNDS,
            &mut rejected,
        );
        let submit_latency_ms = parse_u64_with_bounds(
            "submit_latency_ms",
            raw.submit_latency_ms.as_ref(),
            DEFAULT_SUBMIT_LATENCY_MS,
            SUBMIT_LATENCY_MS_BOUNDS,
            &mut rejected,
        );
        let notice_duration_ms = parse_u64_with_bounds(
            "notice_duration_ms",
            raw.notice_duration_ms.as_ref(),
            DEFAULT_NOTICE_DURATION_MS,
            NOTICE_DURATION_MS_BOUNDS,
            &mut rejected,
        );
        let frame_interval_ms = parse_u64_with_bounds(
            "frame_interval_ms",
            raw.frame_interval_ms.as_ref(),
            DEFAULT_FRAME_INTERVAL_MS,
            FRAME_INTERVAL_MS_BOUNDS,
            &mut rejected,
        );
        let trail_mode = parse_trail_mode(raw.cursor_trail_mode.as_ref(), &mut rejected);
        let log_level = parse_log_level(raw.log_level.as_ref(), DEFAULT_LOG_LEVEL, &mut rejected);
        let reduced_motion = parse_bool(
            "reduced_motion",
            raw.reduced_motion.as_ref(),
            &mut rejected,
        );

        Self {
            cursor: CursorConfig {
                trail_delay: Duration::from_millis(cursor_trail_ms),
                mode: trail_mode,
            },
            contact: ContactTimings {
                submit_latency: Duration::from_millis(submit_latency_ms),
                notice_duration: Duration::from_millis(notice_duration_ms),
            },
            frame_interval: Duration::from_millis(frame_interval_ms),
            reduced_motion,
            log_level,
            rejected,
        }
    }

    /// Frame ticker period for `gloo_timers::callback::Interval`.
    pub fn frame_interval_ms(&self) -> u32 {
        self.frame_interval.as_millis().min(u128::from(u32::MAX)) as u32
    }
}

fn parse_u64_with_bounds(
    name: &'static str,
    value: Option<&Value>,
    default: u64,
    bounds: (u64, u64),
    rejected: &mut Vec<&'static str>,
) -> u64 {
    let Some(value) = value else {
        return default;
    };
    match value.as_u64() {
        Some(value) if (bounds.0..=bounds.1).contains(&value) => value,
        _ => {
            rejected.push(name);
            default
        }
    }
}

fn parse_bool(
    name: &'static str,
    value: Option<&Value>,
    rejected: &mut Vec<&'static str>,
) -> Option<bool> {
    let value = value?;
    let parsed = value.as_bool();
    if parsed.is_none() {
        rejected.push(name);
    }
    parsed
}

/// Lowercased string value, or `None` after recording `name` as rejected.
fn keyword(name: &'static str, value: &Value, rejected: &mut Vec<&'static str>) -> Option<String> {
    let keyword = value.as_str().map(|raw| raw.trim().to_ascii_lowercase());
    if keyword.is_none() {
        rejected.push(name);
    }
    keyword
}

fn parse_trail_mode(value: Option<&Value>, rejected: &mut Vec<&'static str>) -> TrailMode {
    let Some(value) = value else {
        return TrailMode::default();
    };
    let Some(keyword) = keyword("cursor_trail_mode", value, rejected) else {
        return TrailMode::default();
    };
    match keyword.as_str() {
        "trail" => TrailMode::Trail,
        "latest" => TrailMode::Latest,
        _ => {
            rejected.push("cursor_trail_mode");
            TrailMode::default()
        }
    }
}

fn parse_log_level(value: Option<&Value>, default: Level, rejected: &mut Vec<&'static str>) -> Level {
    let Some(value) = value else {
        return default;
    };
    let Some(keyword) = keyword("log_level", value, rejected) else {
        return default;
    };
    match keyword.as_str() {
        "debug" => Level::Debug,
        "info" => Level::Info,
        _ => {
            rejected.push("log_level");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = MotionConfig::from_json("  ").expect("blank is fine");

        assert_eq!(config, MotionConfig::default());
        assert_eq!(config.cursor.trail_delay, Duration::from_millis(100));
        assert_eq!(config.contact.submit_latency, Duration::from_millis(1_500));
        assert_eq!(config.contact.notice_duration, Duration::from_millis(3_000));
        assert_eq!(config.frame_interval_ms(), 16);
    }

    #[test]
    fn overrides_within_bounds_apply() {
        let config = MotionConfig::from_json(
            r#"{
                "cursor_trail_ms": 0,
                "cursor_trail_mode": "Latest",
                "submit_latency_ms": 250,
                "reduced_motion": true,
                "log_level": "debug"
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.cursor.trail_delay, Duration::ZERO);
        assert_eq!(config.cursor.mode, TrailMode::Latest);
        assert_eq!(config.contact.submit_latency, Duration::from_millis(250));
        assert_eq!(config.reduced_motion, Some(true));
        assert_eq!(config.log_level, Level::Debug);
        assert!(config.rejected.is_empty());
    }

    #[test]
    fn out_of_bounds_values_fall_back() {
        let config = MotionConfig::from_json(
            r#"{"notice_duration_ms": 10, "frame_interval_ms": 1000, "log_level": "trace", "cursor_trail_mode": "wobbly"}"#,
        )
        .expect("valid json");

        assert_eq!(config.contact.notice_duration, Duration::from_millis(3_000));
        assert_eq!(config.frame_interval_ms(), 16);
        assert_eq!(config.log_level, Level::Info);
        assert_eq!(config.cursor.mode, TrailMode::Trail);
        assert_eq!(
            config.rejected,
            vec!["notice_duration_ms", "frame_interval_ms", "cursor_trail_mode", "log_level"]
        );
    }

    #[test]
    fn mistyped_values_fall_back_per_key() {
        let config = MotionConfig::from_json(
            r#"{
                "cursor_trail_ms": -1,
                "submit_latency_ms": 1.5,
                "frame_interval_ms": "20",
                "reduced_motion": "yes",
                "cursor_trail_mode": 3,
                "log_level": "debug"
            }"#,
        )
        .expect("well-formed json");

        assert_eq!(config.cursor.trail_delay, Duration::from_millis(100));
        assert_eq!(config.contact.submit_latency, Duration::from_millis(1_500));
        assert_eq!(config.frame_interval_ms(), 16);
        assert_eq!(config.reduced_motion, None);
        assert_eq!(config.cursor.mode, TrailMode::Trail);
        assert_eq!(config.log_level, Level::Debug);
        assert_eq!(
            config.rejected,
            vec![
                "cursor_trail_ms",
                "submit_latency_ms",
                "frame_interval_ms",
                "cursor_trail_mode",
                "reduced_motion",
            ]
        );
    }

    #[test]
    fn null_values_count_as_absent() {
        let config =
            MotionConfig::from_json(r#"{"cursor_trail_ms": null, "reduced_motion": null}"#)
                .expect("valid json");

        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = MotionConfig::from_json(r#"{"theme": "dark"}"#).expect("valid json");

        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            MotionConfig::from_json("{ cursor_trail_ms: }"),
            Err(ConfigError::Json(_))
        ));
    }
}
