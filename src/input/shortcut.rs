//! Shortcut modifiers
//!
//! The set of modifier keys configured as shortcut (and mouse capture) keys,
//! written as e.g. `lalt,lsuper` on the command line and in the config file.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::events::{keycodes, Keycode};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("Empty shortcut modifier list")]
    Empty,

    #[error(
        "Unknown shortcut modifier: {0:?} (expected lctrl, rctrl, lalt, ralt, lsuper or rsuper)"
    )]
    Unknown(String),
}

bitflags! {
    /// Bitmask of shortcut modifier keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShortcutMods: u8 {
        const LCTRL = 1 << 0;
        const RCTRL = 1 << 1;
        const LALT = 1 << 2;
        const RALT = 1 << 3;
        const LSUPER = 1 << 4;
        const RSUPER = 1 << 5;
    }
}

impl ShortcutMods {
    const TABLE: [(ShortcutMods, &'static str, Keycode); 6] = [
        (Self::LCTRL, "lctrl", keycodes::KEY_LEFT_CTRL),
        (Self::RCTRL, "rctrl", keycodes::KEY_RIGHT_CTRL),
        (Self::LALT, "lalt", keycodes::KEY_LEFT_ALT),
        (Self::RALT, "ralt", keycodes::KEY_RIGHT_ALT),
        (Self::LSUPER, "lsuper", keycodes::KEY_LEFT_META),
        (Self::RSUPER, "rsuper", keycodes::KEY_RIGHT_META),
    ];

    /// One keycode per configured modifier
    pub fn keys(&self) -> Vec<Keycode> {
        Self::TABLE
            .iter()
            .filter(|(m, _, _)| self.contains(*m))
            .map(|(_, _, key)| *key)
            .collect()
    }
}

impl Default for ShortcutMods {
    fn default() -> Self {
        Self::LALT | Self::LSUPER
    }
}

impl fmt::Display for ShortcutMods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::TABLE
            .iter()
            .filter(|(m, _, _)| self.contains(*m))
            .map(|(_, name, _)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}

impl FromStr for ShortcutMods {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = ShortcutMods::empty();
        for item in s.split([',', '+']).map(str::trim).filter(|item| !item.is_empty()) {
            let lower = item.to_ascii_lowercase();
            let (m, _, _) = Self::TABLE
                .iter()
                .find(|(_, name, _)| *name == lower)
                .ok_or_else(|| ShortcutParseError::Unknown(item.to_string()))?;
            mods.insert(*m);
        }

        if mods.is_empty() {
            return Err(ShortcutParseError::Empty);
        }
        Ok(mods)
    }
}

// Stored as the same text accepted on the command line
impl Serialize for ShortcutMods {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShortcutMods {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mods() {
        let mods = ShortcutMods::default();
        assert_eq!(mods.to_string(), "lalt,lsuper");
        assert_eq!(mods.keys(), vec![keycodes::KEY_LEFT_ALT, keycodes::KEY_LEFT_META]);
    }

    #[test]
    fn test_parse() {
        let mods: ShortcutMods = "RCtrl + lctrl".parse().unwrap();
        assert!(mods.contains(ShortcutMods::LCTRL));
        assert!(mods.contains(ShortcutMods::RCTRL));
        assert!(!mods.contains(ShortcutMods::LALT));
        assert_eq!(mods.keys(), vec![keycodes::KEY_LEFT_CTRL, keycodes::KEY_RIGHT_CTRL]);
    }

    #[test]
    fn test_set_operations() {
        let mut mods = ShortcutMods::LCTRL | ShortcutMods::RSUPER;
        assert!(!mods.is_empty());
        assert!(ShortcutMods::empty().keys().is_empty());
        mods.insert(ShortcutMods::RALT);
        mods.remove(ShortcutMods::LCTRL);
        assert_eq!(mods.to_string(), "ralt,rsuper");
        assert_eq!(mods.keys(), vec![keycodes::KEY_RIGHT_ALT, keycodes::KEY_RIGHT_META]);
        assert_eq!(ShortcutMods::all().keys().len(), 6);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ShortcutMods>(), Err(ShortcutParseError::Empty));
        assert_eq!(" , ".parse::<ShortcutMods>(), Err(ShortcutParseError::Empty));
        assert_eq!(
            "lalt,shift".parse::<ShortcutMods>(),
            Err(ShortcutParseError::Unknown("shift".to_string()))
        );
    }
}
