pub mod ambient;
pub mod clock;
pub mod config;
pub mod contact;
pub mod content;
pub mod cursor;
pub mod motion;
pub mod page;
pub mod reveal;
pub mod schedule;
pub mod skills;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
