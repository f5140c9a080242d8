//! Key-code translation for keyboard players.
//!
//! Keyboard inputs arrive as SDL key codes and Dolphin's DInput backend wants its
//! own key names. Letters go through unchanged (upper-cased), with the AZERTY
//! swap applied first so that the physical key stays where the player expects it.

use tracing::debug;

/// Windows keyboard layout ids of the AZERTY family (fr-FR, fr-BE, fr-CA, fr-LU, fr-CH).
pub const AZERTY_LAYOUTS: [u32; 5] = [1036, 2060, 3084, 5132, 4108];

/// Translates SDL key codes for one keyboard layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTranslator {
    layout: Option<u32>,
}

impl KeyTranslator {
    pub fn new(layout: Option<u32>) -> Self {
        Self { layout }
    }

    pub fn is_azerty(&self) -> bool {
        self.layout.is_some_and(|id| AZERTY_LAYOUTS.contains(&id))
    }

    /// Dolphin key name for `code`, `None` when the key has no known name.
    pub fn translate(&self, code: i64) -> Option<String> {
        if let Some(letter) = u8::try_from(code).ok().filter(u8::is_ascii_lowercase) {
            let letter = if self.is_azerty() {
                azerty_swap(letter)
            } else {
                letter
            };
            return Some(char::from(letter.to_ascii_uppercase()).to_string());
        }

        let name = special_key_name(code);
        if name.is_none() {
            debug!("No key name for code {:#x}", code);
        }
        name.map(str::to_string)
    }
}

fn azerty_swap(letter: u8) -> u8 {
    match letter {
        b'a' => b'q',
        b'q' => b'a',
        b'w' => b'z',
        b'z' => b'w',
        other => other,
    }
}

fn special_key_name(code: i64) -> Option<&'static str> {
    let name = match code {
        32 => "SPACE",
        13 | 0x4000009e => "RETURN",

        0x400000e1 => "LSHIFT",
        0x400000e0 => "LCONTROL",
        0x400000e2 => "LMENU",

        0x4000004b => "PRIOR",
        0x4000004e => "NEXT",
        0x4000004d => "END",
        0x4000004a => "HOME",
        0x40000050 => "LEFT",
        0x40000052 => "UP",
        0x4000004f => "RIGHT",
        0x40000051 => "DOWN",
        0x40000049 => "INSERT",
        0x0000007f => "DELETE",

        0x40000059 => "NUMPAD1",
        0x4000005a => "NUMPAD2",
        0x4000005b => "NUMPAD3",
        0x4000005c => "NUMPAD4",
        0x4000005d => "NUMPAD5",
        0x4000005e => "NUMPAD6",
        0x4000005f => "NUMPAD7",
        0x40000060 => "NUMPAD8",
        0x40000061 => "NUMPAD9",
        0x40000062 => "NUMPAD0",
        0x40000055 => "MULTIPLY",
        0x40000057 => "ADD",
        // Dolphin's own spelling
        0x40000056 => "SUBSTRACT",
        0x40000058 => "NUMPADENTER",

        0x4000003a => "F1",
        0x4000003b => "F2",
        0x4000003c => "F3",
        0x4000003d => "F4",
        0x4000003e => "F5",
        0x4000003f => "F6",
        0x40000040 => "F7",
        0x40000041 => "F8",
        0x40000042 => "F9",
        0x40000043 => "F10",
        0x40000044 => "F11",
        0x40000045 => "F12",

        0x400000e6 => "RMENU",
        0x400000e4 => "RCONTROL",
        0x400000e5 => "RSHIFT",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_upper_cased() {
        let qwerty = KeyTranslator::new(Some(1033));
        assert_eq!(qwerty.translate('a' as i64).as_deref(), Some("A"));
        assert_eq!(qwerty.translate('q' as i64).as_deref(), Some("Q"));
        assert_eq!(qwerty.translate('m' as i64).as_deref(), Some("M"));
    }

    #[test]
    fn test_azerty_swaps_a_q_w_z() {
        let azerty = KeyTranslator::new(Some(1036));
        assert!(azerty.is_azerty());
        assert_eq!(azerty.translate('a' as i64).as_deref(), Some("Q"));
        assert_eq!(azerty.translate('q' as i64).as_deref(), Some("A"));
        assert_eq!(azerty.translate('w' as i64).as_deref(), Some("Z"));
        assert_eq!(azerty.translate('z' as i64).as_deref(), Some("W"));
        assert_eq!(azerty.translate('e' as i64).as_deref(), Some("E"));
    }

    #[test]
    fn test_every_azerty_layout_is_recognised() {
        for id in AZERTY_LAYOUTS {
            assert_eq!(
                KeyTranslator::new(Some(id)).translate('a' as i64).as_deref(),
                Some("Q")
            );
        }
        assert!(!KeyTranslator::new(None).is_azerty());
    }

    #[test]
    fn test_special_keys() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate(32).as_deref(), Some("SPACE"));
        assert_eq!(t.translate(13).as_deref(), Some("RETURN"));
        assert_eq!(t.translate(0x4000009e).as_deref(), Some("RETURN"));
        assert_eq!(t.translate(0x40000062).as_deref(), Some("NUMPAD0"));
        assert_eq!(t.translate(0x40000045).as_deref(), Some("F12"));
        assert_eq!(t.translate(0x40000058).as_deref(), Some("NUMPADENTER"));
        assert_eq!(t.translate(0x400000e5).as_deref(), Some("RSHIFT"));
    }

    #[test]
    fn test_unknown_codes_yield_none() {
        let t = KeyTranslator::default();
        assert_eq!(t.translate('A' as i64), None);
        assert_eq!(t.translate(0x40000063), None);
        assert_eq!(t.translate(-1), None);
        assert_eq!(t.translate(1_000), None);
    }
}
