//! # Settings Batch
//!
//! The compiler does not touch the filesystem. It records every write it wants
//! to make into a [`SettingsBatch`], which the launcher's settings writer later
//! applies to Dolphin's INI files.
//!
//! ## Semantics
//! - Writes are ordered by first appearance of their `(file, section, key)`.
//! - Writing an existing key again replaces its value in place (last write wins),
//!   so no triple is ever reported twice.
//! - A section can be marked *cleared*, meaning the writer should drop whatever the
//!   file held in that section before applying the batch.
//! - Removing a key drops a pending write and tells the writer to delete the key.
//!
//! [`SettingsBatch::render`] produces INI text for inspection; it is not a
//! replacement for the real writer, which has to merge into existing files.

use indexmap::{IndexMap, IndexSet};
use std::fmt::{self, Display, Write as _};

/// Dolphin configuration files touched by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigFile {
    GcPad,
    Wiimote,
    Dolphin,
    Hotkeys,
}

impl ConfigFile {
    pub const ALL: [ConfigFile; 4] = [
        ConfigFile::GcPad,
        ConfigFile::Wiimote,
        ConfigFile::Dolphin,
        ConfigFile::Hotkeys,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFile::GcPad => "GCPadNew.ini",
            ConfigFile::Wiimote => "WiimoteNew.ini",
            ConfigFile::Dolphin => "Dolphin.ini",
            ConfigFile::Hotkeys => "Hotkeys.ini",
        }
    }

    /// Parses a file name (case-insensitive, `.ini` optional).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let stem = name.strip_suffix(".ini").unwrap_or(&name);
        Self::ALL
            .into_iter()
            .find(|f| f.file_name().to_ascii_lowercase().trim_end_matches(".ini") == stem)
    }
}

impl Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// One pending write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingWrite<'a> {
    pub file: ConfigFile,
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SectionState {
    cleared: bool,
    values: IndexMap<String, String>,
    removed: IndexSet<String>,
}

/// Ordered, last-write-wins collection of INI writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsBatch {
    sections: IndexMap<(ConfigFile, String), SectionState>,
}

impl SettingsBatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn section_mut(&mut self, file: ConfigFile, section: &str) -> &mut SectionState {
        self.sections
            .entry((file, section.to_string()))
            .or_default()
    }

    /// Marks a section to be emptied and forgets anything written to it so far.
    pub fn clear_section(&mut self, file: ConfigFile, section: &str) {
        let state = self.section_mut(file, section);
        state.cleared = true;
        state.values.clear();
        state.removed.clear();
    }

    pub fn write(
        &mut self,
        file: ConfigFile,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let key = key.into();
        let state = self.section_mut(file, section);
        state.removed.shift_remove(&key);
        state.values.insert(key, value.into());
    }

    pub fn remove(&mut self, file: ConfigFile, section: &str, key: &str) {
        let state = self.section_mut(file, section);
        state.values.shift_remove(key);
        state.removed.insert(key.to_string());
    }

    pub fn get(&self, file: ConfigFile, section: &str) -> Option<&IndexMap<String, String>> {
        self.sections
            .get(&(file, section.to_string()))
            .map(|s| &s.values)
    }

    pub fn value(&self, file: ConfigFile, section: &str, key: &str) -> Option<&str> {
        self.get(file, section)
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    pub fn is_cleared(&self, file: ConfigFile, section: &str) -> bool {
        self.sections
            .get(&(file, section.to_string()))
            .is_some_and(|s| s.cleared)
    }

    pub fn removed_keys(&self, file: ConfigFile, section: &str) -> Vec<&str> {
        self.sections
            .get(&(file, section.to_string()))
            .map(|s| s.removed.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn sections(&self, file: ConfigFile) -> impl Iterator<Item = &str> {
        self.sections
            .keys()
            .filter(move |(f, _)| *f == file)
            .map(|(_, s)| s.as_str())
    }

    pub fn writes(&self) -> impl Iterator<Item = SettingWrite<'_>> {
        self.sections.iter().flat_map(|((file, section), state)| {
            state.values.iter().map(move |(key, value)| SettingWrite {
                file: *file,
                section: section.as_str(),
                key: key.as_str(),
                value: value.as_str(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(|s| s.values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// INI text for one file. Cleared sections and removed keys are annotated.
    pub fn render(&self, file: ConfigFile) -> String {
        let mut out = String::new();
        for ((f, section), state) in &self.sections {
            if *f != file {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", section);
            if state.cleared {
                let _ = writeln!(out, "; cleared");
            }
            for key in &state.removed {
                let _ = writeln!(out, "; removed {}", key);
            }
            for (key, value) in &state.values {
                let _ = writeln!(out, "{} = {}", key, value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_in_place() {
        let mut batch = SettingsBatch::new();
        batch.write(ConfigFile::GcPad, "GCPad1", "Buttons/A", "`Button 0`");
        batch.write(ConfigFile::GcPad, "GCPad1", "Buttons/B", "`Button 1`");
        batch.write(ConfigFile::GcPad, "GCPad1", "Buttons/A", "`Button 2`");

        let keys: Vec<_> = batch.writes().map(|w| (w.key, w.value)).collect();
        assert_eq!(
            keys,
            vec![("Buttons/A", "`Button 2`"), ("Buttons/B", "`Button 1`")]
        );
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_clear_forgets_previous_writes() {
        let mut batch = SettingsBatch::new();
        batch.write(ConfigFile::Wiimote, "Wiimote1", "Source", "1");
        batch.clear_section(ConfigFile::Wiimote, "Wiimote1");
        assert!(batch.is_cleared(ConfigFile::Wiimote, "Wiimote1"));
        assert_eq!(batch.value(ConfigFile::Wiimote, "Wiimote1", "Source"), None);
    }

    #[test]
    fn test_remove_then_write_restores_key() {
        let mut batch = SettingsBatch::new();
        batch.write(ConfigFile::Wiimote, "Wiimote1", "Tilt/Left", "`Axis 0-`");
        batch.remove(ConfigFile::Wiimote, "Wiimote1", "Tilt/Left");
        assert_eq!(batch.value(ConfigFile::Wiimote, "Wiimote1", "Tilt/Left"), None);
        assert_eq!(
            batch.removed_keys(ConfigFile::Wiimote, "Wiimote1"),
            vec!["Tilt/Left"]
        );

        batch.write(ConfigFile::Wiimote, "Wiimote1", "Tilt/Left", "`Axis 2-`");
        assert!(batch.removed_keys(ConfigFile::Wiimote, "Wiimote1").is_empty());
    }

    #[test]
    fn test_render_groups_by_file() {
        let mut batch = SettingsBatch::new();
        batch.clear_section(ConfigFile::GcPad, "GCPad1");
        batch.write(ConfigFile::GcPad, "GCPad1", "Device", "XInput/0/Gamepad");
        batch.write(ConfigFile::Dolphin, "Core", "SIDevice0", "6");

        let text = batch.render(ConfigFile::GcPad);
        assert_eq!(text, "[GCPad1]\n; cleared\nDevice = XInput/0/Gamepad\n");
        assert_eq!(batch.render(ConfigFile::Hotkeys), "");
        assert_eq!(batch.sections(ConfigFile::Dolphin).collect::<Vec<_>>(), vec!["Core"]);
    }

    #[test]
    fn test_config_file_from_name() {
        assert_eq!(ConfigFile::from_name("GCPadNew.ini"), Some(ConfigFile::GcPad));
        assert_eq!(ConfigFile::from_name("hotkeys"), Some(ConfigFile::Hotkeys));
        assert_eq!(ConfigFile::from_name("gfx.ini"), None);
    }
}
