//! Mapping templates, overlays and axis tables.
//!
//! Everything in here is immutable `const` data. A pass copies the template it
//! needs into a [`MappingTable`] before any overlay touches it.

use super::input::LogicalInput;
use indexmap::IndexMap;
use std::str::FromStr;

/// Destination control in Dolphin's scheme, e.g. `"Buttons/A"`.
pub type BindingPath = &'static str;

type Template = &'static [(LogicalInput, &'static [BindingPath])];
pub type Overlay = &'static [(LogicalInput, BindingPath)];

/// Ordered logical input -> binding path(s).
///
/// A key may drive more than one path (GameCube triggers feed both the analog and the
/// digital trigger). Keys are unique; rebinding replaces every path of the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    name: &'static str,
    entries: IndexMap<LogicalInput, Vec<BindingPath>>,
}

impl MappingTable {
    pub fn from_template(name: &'static str, template: Template) -> Self {
        let entries = template
            .iter()
            .map(|(input, paths)| (*input, paths.to_vec()))
            .collect();
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Binds `input` to `path`, appending the key when the table lacks it.
    pub fn set(&mut self, input: LogicalInput, path: BindingPath) {
        self.entries.insert(input, vec![path]);
    }

    /// Applies an overlay to keys the table already has; absent keys are left alone.
    pub fn overlay(&mut self, overlay: &[(LogicalInput, BindingPath)]) {
        for (input, path) in overlay {
            if let Some(paths) = self.entries.get_mut(input) {
                *paths = vec![*path];
            }
        }
    }

    /// Applies an overlay with `set` semantics.
    pub fn extend(&mut self, overlay: &[(LogicalInput, BindingPath)]) {
        for (input, path) in overlay {
            self.set(*input, path);
        }
    }

    pub fn remove(&mut self, input: LogicalInput) {
        self.entries.shift_remove(&input);
    }

    pub fn paths(&self, input: LogicalInput) -> Option<&[BindingPath]> {
        self.entries.get(&input).map(Vec::as_slice)
    }

    pub fn primary(&self, input: LogicalInput) -> Option<BindingPath> {
        self.paths(input).and_then(|p| p.first().copied())
    }

    pub fn contains(&self, input: LogicalInput) -> bool {
        self.entries.contains_key(&input)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalInput, &[BindingPath])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Forward stick path -> opposite direction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseAxisTable {
    pub name: &'static str,
    entries: &'static [(BindingPath, BindingPath)],
}

impl ReverseAxisTable {
    pub fn companion(&self, path: &str) -> Option<BindingPath> {
        self.entries
            .iter()
            .find(|(forward, _)| *forward == path)
            .map(|(_, reverse)| *reverse)
    }
}

/// Stick input name -> digital stand-in used when the pad has no such stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementTable {
    pub name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl ReplacementTable {
    pub fn fallback(&self, name: &str) -> Option<LogicalInput> {
        self.entries
            .iter()
            .find(|(from, _)| *from == name)
            .and_then(|(_, to)| LogicalInput::from_str(to).ok())
    }
}

pub const GAMECUBE_STANDARD: Template = &[
    (LogicalInput::L3, &["Main Stick/Modifier"]),
    (LogicalInput::R3, &["C-Stick/Modifier"]),
    (LogicalInput::L2, &["Triggers/L-Analog", "Triggers/L"]),
    (LogicalInput::R2, &["Triggers/R-Analog", "Triggers/R"]),
    (LogicalInput::Y, &["Buttons/Y"]),
    (LogicalInput::B, &["Buttons/B"]),
    (LogicalInput::X, &["Buttons/X"]),
    (LogicalInput::A, &["Buttons/A"]),
    (LogicalInput::Start, &["Buttons/Start"]),
    (LogicalInput::R1, &["Buttons/Z"]),
    (LogicalInput::Up, &["D-Pad/Up"]),
    (LogicalInput::Down, &["D-Pad/Down"]),
    (LogicalInput::Left, &["D-Pad/Left"]),
    (LogicalInput::Right, &["D-Pad/Right"]),
    (LogicalInput::Joystick1Up, &["Main Stick/Up"]),
    (LogicalInput::Joystick1Left, &["Main Stick/Left"]),
    (LogicalInput::Joystick2Up, &["C-Stick/Up"]),
    (LogicalInput::Joystick2Left, &["C-Stick/Left"]),
    (LogicalInput::Hotkey, &["Buttons/Hotkey"]),
];

/// Triforce boards open the service menu with Z, so Z leaves R1 for a combo bound
/// separately and X moves to select.
pub const GAMECUBE_ALT_LAYOUT: Template = &[
    (LogicalInput::L2, &["Triggers/L-Analog", "Triggers/L"]),
    (LogicalInput::R2, &["Triggers/R-Analog", "Triggers/R"]),
    (LogicalInput::Y, &["Buttons/Y"]),
    (LogicalInput::B, &["Buttons/B"]),
    (LogicalInput::Select, &["Buttons/X"]),
    (LogicalInput::A, &["Buttons/A"]),
    (LogicalInput::Start, &["Buttons/Start"]),
    (LogicalInput::Up, &["D-Pad/Up"]),
    (LogicalInput::Down, &["D-Pad/Down"]),
    (LogicalInput::Left, &["D-Pad/Left"]),
    (LogicalInput::Right, &["D-Pad/Right"]),
    (LogicalInput::Joystick1Up, &["Main Stick/Up"]),
    (LogicalInput::Joystick1Left, &["Main Stick/Left"]),
    (LogicalInput::Joystick2Up, &["C-Stick/Up"]),
    (LogicalInput::Joystick2Left, &["C-Stick/Left"]),
    (LogicalInput::Hotkey, &["Buttons/Hotkey"]),
];

pub const WII_EMULATED_BASE: Template = &[
    (LogicalInput::X, &["Buttons/2"]),
    (LogicalInput::B, &["Buttons/A"]),
    (LogicalInput::Y, &["Buttons/1"]),
    (LogicalInput::A, &["Buttons/B"]),
    (LogicalInput::L1, &["Buttons/-"]),
    (LogicalInput::R1, &["Buttons/+"]),
    (LogicalInput::Select, &["Buttons/Home"]),
    (LogicalInput::Up, &["D-Pad/Up"]),
    (LogicalInput::Down, &["D-Pad/Down"]),
    (LogicalInput::Left, &["D-Pad/Left"]),
    (LogicalInput::Right, &["D-Pad/Right"]),
    (LogicalInput::Joystick1Up, &["IR/Up"]),
    (LogicalInput::Joystick1Left, &["IR/Left"]),
    (LogicalInput::Joystick2Up, &["Tilt/Forward"]),
    (LogicalInput::Joystick2Left, &["Tilt/Left"]),
    (LogicalInput::L3, &["IR/Relative Input Hold"]),
    (LogicalInput::R3, &["Tilt/Modifier"]),
];

pub const GAMECUBE_REVERSE_AXES: ReverseAxisTable = ReverseAxisTable {
    name: "gamecube",
    entries: &[
        ("Main Stick/Up", "Main Stick/Down"),
        ("Main Stick/Left", "Main Stick/Right"),
        ("C-Stick/Up", "C-Stick/Down"),
        ("C-Stick/Left", "C-Stick/Right"),
    ],
};

/// Axis pairs once the vs4 remap has turned the main stick by a quarter.
pub const VS4_REVERSE_AXES: ReverseAxisTable = ReverseAxisTable {
    name: "vs4",
    entries: &[
        ("Main Stick/Down", "Main Stick/Up"),
        ("Main Stick/Left", "Main Stick/Right"),
        ("C-Stick/Up", "C-Stick/Down"),
        ("C-Stick/Left", "C-Stick/Right"),
    ],
};

pub const WII_REVERSE_AXES: ReverseAxisTable = ReverseAxisTable {
    name: "wii",
    entries: &[
        ("IR/Up", "IR/Down"),
        ("IR/Left", "IR/Right"),
        ("Swing/Up", "Swing/Down"),
        ("Swing/Left", "Swing/Right"),
        ("Tilt/Left", "Tilt/Right"),
        ("Tilt/Forward", "Tilt/Backward"),
        ("Nunchuk/Stick/Up", "Nunchuk/Stick/Down"),
        ("Nunchuk/Stick/Left", "Nunchuk/Stick/Right"),
        ("Classic/Right Stick/Up", "Classic/Right Stick/Down"),
        ("Classic/Right Stick/Left", "Classic/Right Stick/Right"),
        ("Classic/Left Stick/Up", "Classic/Left Stick/Down"),
        ("Classic/Left Stick/Left", "Classic/Left Stick/Right"),
    ],
};

pub const GAMECUBE_REPLACEMENTS: ReplacementTable = ReplacementTable {
    name: "gamecube",
    entries: &[
        ("joystick1up", "up"),
        ("joystick1left", "left"),
        ("joystick1down", "down"),
        ("joystick1right", "right"),
    ],
};

pub const REVERSE_ALL: Overlay = &[
    (LogicalInput::B, "Buttons/A"),
    (LogicalInput::A, "Buttons/B"),
    (LogicalInput::X, "Buttons/Y"),
    (LogicalInput::Y, "Buttons/X"),
];

pub const REVERSE_AB: Overlay = &[
    (LogicalInput::B, "Buttons/A"),
    (LogicalInput::A, "Buttons/B"),
];

pub const REVERSE_ROTATE: Overlay = &[
    (LogicalInput::B, "Buttons/A"),
    (LogicalInput::Y, "Buttons/B"),
    (LogicalInput::X, "Buttons/Y"),
    (LogicalInput::A, "Buttons/X"),
];

pub const CLASSIC_REVERSE_ALL: Overlay = &[
    (LogicalInput::B, "Classic/Buttons/A"),
    (LogicalInput::A, "Classic/Buttons/B"),
    (LogicalInput::X, "Classic/Buttons/Y"),
    (LogicalInput::Y, "Classic/Buttons/X"),
];

pub const CLASSIC_REVERSE_AB: Overlay = &[
    (LogicalInput::B, "Classic/Buttons/A"),
    (LogicalInput::A, "Classic/Buttons/B"),
];

pub const CLASSIC_REVERSE_ROTATE: Overlay = &[
    (LogicalInput::B, "Classic/Buttons/A"),
    (LogicalInput::Y, "Classic/Buttons/B"),
    (LogicalInput::X, "Classic/Buttons/Y"),
    (LogicalInput::A, "Classic/Buttons/X"),
];

/// Keyboard face keys, unswapped.
pub const KEYBOARD_FACES: Overlay = &[
    (LogicalInput::A, "Buttons/A"),
    (LogicalInput::B, "Buttons/B"),
    (LogicalInput::X, "Buttons/X"),
    (LogicalInput::Y, "Buttons/Y"),
];

pub const VS4_OVERLAY: Overlay = &[
    (LogicalInput::Joystick1Left, "Main Stick/Down"),
    (LogicalInput::Joystick1Up, "Main Stick/Left"),
];

/// Keyboards have no stick, so the d-pad keys drive the main stick instead.
pub const KEYBOARD_DIRECTIONS: Overlay = &[
    (LogicalInput::Up, "Main Stick/Up"),
    (LogicalInput::Down, "Main Stick/Down"),
    (LogicalInput::Left, "Main Stick/Left"),
    (LogicalInput::Right, "Main Stick/Right"),
];

pub const SIDEWAYS_WIIMOTE: Overlay = &[
    (LogicalInput::X, "Buttons/A"),
    (LogicalInput::Y, "Buttons/1"),
    (LogicalInput::B, "Buttons/2"),
    (LogicalInput::A, "Buttons/B"),
    (LogicalInput::L2, "Shake/Z"),
    (LogicalInput::Select, "Buttons/-"),
    (LogicalInput::Start, "Buttons/+"),
    (LogicalInput::L1, "Tilt/Left"),
    (LogicalInput::R1, "Tilt/Right"),
];

/// What one physical stick (and its press) drives under a motion scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickScheme {
    pub up: BindingPath,
    pub left: BindingPath,
    pub press: Option<BindingPath>,
}

pub const IR_STICK: StickScheme = StickScheme {
    up: "IR/Up",
    left: "IR/Left",
    press: Some("IR/Relative Input Hold"),
};

pub const SWING_STICK: StickScheme = StickScheme {
    up: "Swing/Up",
    left: "Swing/Left",
    press: None,
};

pub const TILT_STICK: StickScheme = StickScheme {
    up: "Tilt/Forward",
    left: "Tilt/Left",
    press: Some("Tilt/Modifier"),
};

pub const NUNCHUK_STICK: StickScheme = StickScheme {
    up: "Nunchuk/Stick/Up",
    left: "Nunchuk/Stick/Left",
    press: Some("Nunchuk/Stick/Modifier"),
};

/// Buttons that move to the nunchuk whenever it is attached.
pub const NUNCHUK_BUTTONS: Overlay = &[
    (LogicalInput::L1, "Nunchuk/Buttons/C"),
    (LogicalInput::R1, "Nunchuk/Buttons/Z"),
    (LogicalInput::Select, "Buttons/-"),
    (LogicalInput::Start, "Buttons/+"),
    (LogicalInput::L2, "Shake/Z"),
];

pub const CLASSIC_CONTROLLER: Overlay = &[
    (LogicalInput::X, "Classic/Buttons/X"),
    (LogicalInput::Y, "Classic/Buttons/Y"),
    (LogicalInput::B, "Classic/Buttons/B"),
    (LogicalInput::A, "Classic/Buttons/A"),
    (LogicalInput::Select, "Classic/Buttons/-"),
    (LogicalInput::Start, "Classic/Buttons/+"),
    (LogicalInput::Up, "Classic/D-Pad/Up"),
    (LogicalInput::Down, "Classic/D-Pad/Down"),
    (LogicalInput::Left, "Classic/D-Pad/Left"),
    (LogicalInput::Right, "Classic/D-Pad/Right"),
    (LogicalInput::Joystick1Up, "Classic/Left Stick/Up"),
    (LogicalInput::Joystick1Left, "Classic/Left Stick/Left"),
    (LogicalInput::Joystick2Up, "Classic/Right Stick/Up"),
    (LogicalInput::Joystick2Left, "Classic/Right Stick/Left"),
    (LogicalInput::L3, "Classic/Left Stick/Modifier"),
    (LogicalInput::R3, "Classic/Right Stick/Modifier"),
];

pub const CLASSIC_TRIGGERS: Overlay = &[
    (LogicalInput::L1, "Classic/Buttons/ZL"),
    (LogicalInput::R1, "Classic/Buttons/ZR"),
    (LogicalInput::L2, "Classic/Triggers/L"),
    (LogicalInput::R2, "Classic/Triggers/R"),
];

/// Classic Controller Pro puts the digital ZL/ZR under the index fingers.
pub const CLASSIC_PRO_TRIGGERS: Overlay = &[
    (LogicalInput::L1, "Classic/Triggers/L"),
    (LogicalInput::R1, "Classic/Triggers/R"),
    (LogicalInput::L2, "Classic/Buttons/ZL"),
    (LogicalInput::R2, "Classic/Buttons/ZR"),
];
