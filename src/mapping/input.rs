//! Logical inputs: the launcher's abstract control names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Abstract control, independent of the physical device it lives on.
///
/// Names follow the launcher's input configuration (`a`, `pageup`, `joystick1up`, ...).
/// `l1`/`r1` are also accepted under their launcher names `pageup`/`pagedown`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogicalInput {
    A,
    B,
    X,
    Y,
    #[serde(alias = "pageup")]
    #[strum(to_string = "l1", serialize = "pageup")]
    L1,
    #[serde(alias = "pagedown")]
    #[strum(to_string = "r1", serialize = "pagedown")]
    R1,
    L2,
    R2,
    L3,
    R3,
    Up,
    Down,
    Left,
    Right,
    #[serde(rename = "joystick1up")]
    #[strum(to_string = "joystick1up")]
    Joystick1Up,
    #[serde(rename = "joystick1left")]
    #[strum(to_string = "joystick1left")]
    Joystick1Left,
    #[serde(rename = "joystick2up")]
    #[strum(to_string = "joystick2up")]
    Joystick2Up,
    #[serde(rename = "joystick2left")]
    #[strum(to_string = "joystick2left")]
    Joystick2Left,
    Start,
    Select,
    Hotkey,
}

impl LogicalInput {
    /// Launcher name of the opposite half-axis (`joystick1up` -> `joystick1down`).
    ///
    /// The opposite directions have no variant of their own; they only appear as keys
    /// of the replacement tables.
    pub fn opposite_stick_name(self) -> Option<&'static str> {
        match self {
            LogicalInput::Joystick1Up => Some("joystick1down"),
            LogicalInput::Joystick1Left => Some("joystick1right"),
            LogicalInput::Joystick2Up => Some("joystick2down"),
            LogicalInput::Joystick2Left => Some("joystick2right"),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_launcher_names_parse() {
        assert_eq!(LogicalInput::from_str("pageup").unwrap(), LogicalInput::L1);
        assert_eq!(LogicalInput::from_str("l1").unwrap(), LogicalInput::L1);
        assert_eq!(LogicalInput::from_str("pagedown").unwrap(), LogicalInput::R1);
        assert_eq!(
            LogicalInput::from_str("joystick1up").unwrap(),
            LogicalInput::Joystick1Up
        );
        assert_eq!(LogicalInput::from_str("hotkey").unwrap(), LogicalInput::Hotkey);
        assert!(LogicalInput::from_str("joystick1down").is_err());
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(LogicalInput::L1.to_string(), "l1");
        assert_eq!(LogicalInput::Joystick2Left.to_string(), "joystick2left");
        assert_eq!(LogicalInput::Select.name(), "select");
    }

    #[test]
    fn test_every_name_round_trips() {
        for input in LogicalInput::iter() {
            assert_eq!(LogicalInput::from_str(input.name()).unwrap(), input);
        }
    }

    #[test]
    fn test_opposite_stick_names() {
        assert_eq!(
            LogicalInput::Joystick1Up.opposite_stick_name(),
            Some("joystick1down")
        );
        assert_eq!(LogicalInput::A.opposite_stick_name(), None);
        assert_eq!(LogicalInput::Up.opposite_stick_name(), None);
    }
}
