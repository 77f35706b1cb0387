//! Core types for the keymap system: KeyChord, Modifiers, key codes

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// Only alt, ctrl and shift take part in a chord. Meta/command is never
/// recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0b001);
    pub const CTRL: Modifiers = Modifiers(0b010);
    pub const SHIFT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(alt: bool, ctrl: bool, shift: bool) -> Self {
        let mut bits = 0u8;
        if alt {
            bits |= 0b001;
        }
        if ctrl {
            bits |= 0b010;
        }
        if shift {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Raw bits, always below 8
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// DOM key codes for the keys the default keymap uses
pub mod key {
    pub const ENTER: u16 = 13;
    pub const ESCAPE: u16 = 27;
    pub const SPACE: u16 = 32;
    pub const LEFT: u16 = 37;
    pub const UP: u16 = 38;
    pub const RIGHT: u16 = 39;
    pub const DOWN: u16 = 40;
    pub const DIGIT_0: u16 = 48;
    pub const LETTER_A: u16 = 65;
    pub const NUMPAD_0: u16 = 96;
    pub const EQUALS: u16 = 187;
    pub const COMMA: u16 = 188;
    pub const MINUS: u16 = 189;
    pub const PERIOD: u16 = 190;
    pub const SLASH: u16 = 191;
    pub const BRACKET_LEFT: u16 = 219;
    pub const BACKSLASH: u16 = 220;
    pub const BRACKET_RIGHT: u16 = 221;

    /// Key code of an ASCII letter or digit
    pub fn for_char(c: char) -> Option<u16> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='z' => Some(LETTER_A + (c as u16 - 'a' as u16)),
            c @ '0'..='9' => Some(DIGIT_0 + (c as u16 - '0' as u16)),
            '=' => Some(EQUALS),
            ',' => Some(COMMA),
            '-' => Some(MINUS),
            '.' => Some(PERIOD),
            '/' => Some(SLASH),
            '[' => Some(BRACKET_LEFT),
            '\\' => Some(BACKSLASH),
            ']' => Some(BRACKET_RIGHT),
            ' ' => Some(SPACE),
            _ => None,
        }
    }

    /// Human readable name of a key code
    pub fn name(code: u16) -> String {
        match code {
            ENTER => "Enter".to_string(),
            ESCAPE => "Escape".to_string(),
            SPACE => "Space".to_string(),
            LEFT => "←".to_string(),
            UP => "↑".to_string(),
            RIGHT => "→".to_string(),
            DOWN => "↓".to_string(),
            48..=57 => ((b'0' + (code - DIGIT_0) as u8) as char).to_string(),
            65..=90 => ((b'A' + (code - LETTER_A) as u8) as char).to_string(),
            96..=105 => format!("Num{}", code - NUMPAD_0),
            EQUALS => "=".to_string(),
            COMMA => ",".to_string(),
            MINUS => "-".to_string(),
            PERIOD => ".".to_string(),
            SLASH => "/".to_string(),
            BRACKET_LEFT => "[".to_string(),
            BACKSLASH => "\\".to_string(),
            BRACKET_RIGHT => "]".to_string(),
            other => format!("#{}", other),
        }
    }
}

/// Comparable key for a chord, unique per (code, modifiers) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordHash(u32);

impl ChordHash {
    pub fn value(self) -> u32 {
        self.0
    }
}

/// A single key chord: a key code with alt/ctrl/shift
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: u16,
    pub mods: Modifiers,
}

impl KeyChord {
    /// Create a new chord
    pub const fn new(code: u16, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// Create a chord with no modifiers
    pub const fn key(code: u16) -> Self {
        Self {
            code,
            mods: Modifiers::NONE,
        }
    }

    /// Create a chord for an ASCII character key
    pub fn char(c: char) -> Option<Self> {
        key::for_char(c).map(Self::key)
    }

    /// Create a chord for an ASCII character key with modifiers
    pub fn char_with_mods(c: char, mods: Modifiers) -> Option<Self> {
        key::for_char(c).map(|code| Self::new(code, mods))
    }

    /// Hash used as the registry lookup key
    pub const fn hash(&self) -> ChordHash {
        ChordHash(((self.code as u32) << 3) | self.mods.bits() as u32)
    }

    /// Display the chord for help listings, e.g. "Shift+Alt+J"
    pub fn display_string(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.ctrl() {
            parts.push("Ctrl+");
        }
        if self.mods.shift() {
            parts.push("Shift+");
        }
        if self.mods.alt() {
            parts.push("Alt+");
        }
        format!("{}{}", parts.join(""), key::name(self.code))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::SHIFT | Modifiers::ALT;
        assert!(mods.shift());
        assert!(mods.alt());
        assert!(!mods.ctrl());
        assert_eq!(Modifiers::new(true, false, true), mods);
    }

    #[test]
    fn test_hash_distinguishes_every_modifier_combination() {
        let mut seen = std::collections::HashSet::new();
        for bits in 0..8u8 {
            let mods = Modifiers::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            assert!(seen.insert(KeyChord::new(74, mods).hash()));
        }
        assert_ne!(
            KeyChord::key(74).hash(),
            KeyChord::key(75).hash(),
            "different codes must not collide"
        );
    }

    #[test]
    fn test_hash_matches_equality() {
        let a = KeyChord::new(74, Modifiers::SHIFT);
        let b = KeyChord::new(74, Modifiers::SHIFT);
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_char_codes() {
        assert_eq!(KeyChord::char('j').unwrap().code, 74);
        assert_eq!(KeyChord::char('K').unwrap().code, 75);
        assert_eq!(KeyChord::char('0').unwrap().code, 48);
        assert_eq!(KeyChord::char('[').unwrap().code, 219);
        assert!(KeyChord::char('é').is_none());
    }

    #[test]
    fn test_display_string() {
        let chord = KeyChord::new(74, Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(chord.display_string(), "Shift+Alt+J");
        assert_eq!(KeyChord::key(key::NUMPAD_0 + 3).display_string(), "Num3");
        assert_eq!(KeyChord::key(key::ENTER).to_string(), "Enter");
    }
}
