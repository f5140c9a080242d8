//! Controller input mapping compiler for the Dolphin emulator.
//!
//! Turns a list of connected controllers plus the launcher's option set into the
//! `(file, section, key, value)` writes Dolphin expects in `GCPadNew.ini`,
//! `WiimoteNew.ini`, `Hotkeys.ini` and `Dolphin.ini`.
//!
//! ```text
//! Capabilities ──► Table selection ──► Overlays ──► Resolver ──► Hotkeys ──► SettingsBatch
//! ```

pub mod config;
pub mod controller;
pub mod mapping;
pub mod persistence;
