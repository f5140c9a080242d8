//! Numeric passthrough: ranges, dead zones, stick calibration curves and rumble.
//!
//! None of these values are computed here. Options are copied as given and the
//! calibration curves are fixed. GameCube pads all share the default curve; only the
//! Classic Controller sticks get a curve per device family.

use super::overlay::WiimoteMode;
use crate::config::SystemOptions;
use crate::controller::capability::{
    PRODUCT_NINTENDO_SWITCH_PRO, PRODUCT_SONY_DS3, PRODUCT_SONY_DS4, PRODUCT_SONY_DS4_DONGLE,
    PRODUCT_SONY_DS4_SLIM, PRODUCT_SONY_DS5,
};
use crate::controller::ControllerCapability;
use crate::persistence::{ConfigFile, SettingsBatch};
use tracing::debug;

const DEFAULT_DEAD_ZONE: &str = "10.0";
const DEFAULT_RANGE: &str = "100.0";
const MODIFIER_RANGE: &str = "50.0";

const SWITCH_PRO_MAIN: &str = "98.50 101.73 102.04 106.46 104.62 102.21 102.00 100.53 97.00 96.50 99.95 100.08 102.40 99.37 99.60 100.17 99.60 100.14 98.87 100.48 102.45 101.12 100.92 97.92 99.00 99.92 100.83 100.45 102.27 98.45 97.16 97.36";
const SWITCH_PRO_C: &str = "98.19 101.79 101.37 102.32 103.05 101.19 99.56 99.11 98.45 100.60 98.65 100.67 99.85 97.31 97.24 96.36 95.94 97.94 98.17 100.24 99.22 98.10 99.69 98.77 97.14 100.45 99.08 100.13 102.61 101.37 100.55 97.03";
// Sony pads share the default curve
const DEFAULT_MAIN: &str = "100.00 101.96 104.75 107.35 109.13 110.30 105.04 101.96 100.00 101.96 105.65 105.14 105.94 103.89 104.87 101.04 100.00 101.96 107.16 107.49 105.93 103.65 102.31 101.96 100.00 101.96 103.68 108.28 108.05 105.96 103.66 101.48";
const DEFAULT_C: &str = "100.00 101.96 104.31 104.51 105.93 104.41 103.44 101.96 100.00 101.96 104.07 105.45 109.33 107.39 104.91 101.96 100.00 101.96 106.79 107.84 105.66 104.16 102.91 100.38 98.14 101.63 105.29 107.30 106.77 104.73 104.87 100.92";

const SONY_PRODUCTS: [u16; 5] = [
    PRODUCT_SONY_DS3,
    PRODUCT_SONY_DS4,
    PRODUCT_SONY_DS4_DONGLE,
    PRODUCT_SONY_DS4_SLIM,
    PRODUCT_SONY_DS5,
];

const GC_STICKS: [&str; 2] = ["Main Stick", "C-Stick"];
const DIRECTIONS: [&str; 4] = ["Up", "Down", "Left", "Right"];

const WII_DEAD_ZONES: [&str; 9] = [
    "Classic/Right Stick/Dead Zone",
    "Classic/Left Stick/Dead Zone",
    "IR/Dead Zone",
    "Tilt/Dead Zone",
    "Swing/Dead Zone",
    "IMUGyroscope/Dead Zone",
    "Nunchuk/Tilt/Dead Zone",
    "Nunchuk/Swing/Dead Zone",
    "Nunchuk/Stick/Dead Zone",
];

const WII_RANGES: [&str; 24] = [
    "IR/Up/Range",
    "IR/Down/Range",
    "IR/Left/Range",
    "IR/Right/Range",
    "Tilt/Forward/Range",
    "Tilt/Left/Range",
    "Tilt/Backward/Range",
    "Tilt/Right/Range",
    "Swing/Up/Range",
    "Swing/Down/Range",
    "Swing/Left/Range",
    "Swing/Right/Range",
    "Nunchuk/Stick/Up/Range",
    "Nunchuk/Stick/Down/Range",
    "Nunchuk/Stick/Left/Range",
    "Nunchuk/Stick/Right/Range",
    "Classic/Left Stick/Up/Range",
    "Classic/Left Stick/Down/Range",
    "Classic/Left Stick/Left/Range",
    "Classic/Left Stick/Right/Range",
    "Classic/Right Stick/Up/Range",
    "Classic/Right Stick/Down/Range",
    "Classic/Right Stick/Left/Range",
    "Classic/Right Stick/Right/Range",
];

const MOTION_PAD_BINDINGS: [(&str, &str); 12] = [
    ("IMUAccelerometer/Up", "`Accel Up`"),
    ("IMUAccelerometer/Down", "`Accel Down`"),
    ("IMUAccelerometer/Left", "`Accel Left`"),
    ("IMUAccelerometer/Right", "`Accel Right`"),
    ("IMUAccelerometer/Forward", "`Accel Forward`"),
    ("IMUAccelerometer/Backward", "`Accel Backward`"),
    ("IMUGyroscope/Pitch Up", "`Gyro Pitch Up`"),
    ("IMUGyroscope/Pitch Down", "`Gyro Pitch Down`"),
    ("IMUGyroscope/Roll Left", "`Gyro Roll Left`"),
    ("IMUGyroscope/Roll Right", "`Gyro Roll Right`"),
    ("IMUGyroscope/Yaw Left", "`Gyro Yaw Left`"),
    ("IMUGyroscope/Yaw Right", "`Gyro Yaw Right`"),
];

/// Bindings the real motion sensors take over.
const MOTION_PAD_REPLACED: [&str; 11] = [
    "Tilt/Forward",
    "Tilt/Left",
    "Tilt/Right",
    "Tilt/Backward",
    "Shake/X",
    "Shake/Y",
    "Shake/Z",
    "Swing/Down",
    "Swing/Right",
    "Swing/Up",
    "Swing/Left",
];

/// Device family a Classic Controller curve is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationBucket {
    SwitchPro,
    Sony,
    Default,
}

impl CalibrationBucket {
    /// Matches on the product id alone, whatever the vendor reports.
    pub fn classify(pad: &ControllerCapability) -> Self {
        if pad.product_id == PRODUCT_NINTENDO_SWITCH_PRO {
            CalibrationBucket::SwitchPro
        } else if SONY_PRODUCTS.contains(&pad.product_id) {
            CalibrationBucket::Sony
        } else {
            CalibrationBucket::Default
        }
    }

    /// `(left stick, right stick)` curves.
    pub fn curves(self) -> (&'static str, &'static str) {
        match self {
            CalibrationBucket::SwitchPro => (SWITCH_PRO_MAIN, SWITCH_PRO_C),
            CalibrationBucket::Sony | CalibrationBucket::Default => (DEFAULT_MAIN, DEFAULT_C),
        }
    }
}

/// Numeric keys of a GameCube pad section.
pub fn write_gamecube(
    batch: &mut SettingsBatch,
    section: &str,
    options: &SystemOptions,
    rumble_motor: &str,
) {
    let file = ConfigFile::GcPad;
    let dead_zone = options.non_empty("dolphin_gcpad_deadzone").unwrap_or(DEFAULT_DEAD_ZONE);
    let range = options.non_empty("dolphin_gcpad_sensitivity").unwrap_or(DEFAULT_RANGE);

    for stick in GC_STICKS {
        batch.write(file, section, format!("{}/Modifier/Range", stick), MODIFIER_RANGE);
    }
    for stick in GC_STICKS {
        batch.write(file, section, format!("{}/Dead Zone", stick), dead_zone);
    }
    for stick in GC_STICKS {
        for direction in DIRECTIONS {
            batch.write(file, section, format!("{}/{}/Range", stick, direction), range);
        }
    }

    batch.write(file, section, "Main Stick/Calibration", DEFAULT_MAIN);
    batch.write(file, section, "C-Stick/Calibration", DEFAULT_C);

    // Rumble bleibt an, solange der Launcher es nicht abschaltet
    if !options.get_bool("input_rumble") {
        batch.write(file, section, "Rumble/Motor", rumble_motor);
    }
}

/// Numeric keys of an emulated Wii remote section.
pub fn write_wiimote(
    batch: &mut SettingsBatch,
    section: &str,
    options: &SystemOptions,
    pad: &ControllerCapability,
    mode: WiimoteMode,
) {
    let file = ConfigFile::Wiimote;
    let dead_zone = options.non_empty("dolphin_wii_deadzone").unwrap_or(DEFAULT_DEAD_ZONE);
    let range = options.non_empty("dolphin_wii_sensitivity").unwrap_or(DEFAULT_RANGE);

    for key in WII_DEAD_ZONES {
        batch.write(file, section, key, dead_zone);
    }
    for key in WII_RANGES {
        batch.write(file, section, key, range);
    }

    if mode.is_classic() {
        let bucket = CalibrationBucket::classify(pad);
        let (left, right) = bucket.curves();
        debug!("{}: {:?} classic calibration", section, bucket);
        batch.write(file, section, "Classic/Left Stick/Calibration", left);
        batch.write(file, section, "Classic/Right Stick/Calibration", right);
    }

    if options.get_bool("wii_motionpad") {
        debug!("{}: motion sensors replace tilt, shake and swing", section);
        for (key, value) in MOTION_PAD_BINDINGS {
            batch.write(file, section, key, value);
        }
        for key in MOTION_PAD_REPLACED {
            batch.remove(file, section, key);
        }
    }
}
