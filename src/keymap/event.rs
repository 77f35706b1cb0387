//! Raw key events as delivered by the host, and their conversion to chords

use super::types::{KeyChord, Modifiers};

/// Where a key event was aimed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventTarget {
    /// The page body; keyboard navigation may handle the event
    #[default]
    Body,
    /// A text field or other input-capturing element
    Input,
}

/// A keydown event as reported by the host environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub code: u16,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
    pub target: EventTarget,
}

impl RawKeyEvent {
    /// Plain key press on the page body
    pub fn key(code: u16) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    /// Key press on the page body carrying the modifiers of `chord`
    pub fn from_chord(chord: KeyChord) -> Self {
        Self {
            code: chord.code,
            alt: chord.mods.alt(),
            ctrl: chord.mods.ctrl(),
            shift: chord.mods.shift(),
            meta: false,
            target: EventTarget::Body,
        }
    }

    /// Same event, aimed at another target
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }
}

impl KeyChord {
    /// Encode a raw event; the meta key never takes part in a chord
    pub fn from_event(event: &RawKeyEvent) -> Self {
        KeyChord::new(
            event.code,
            Modifiers::new(event.alt, event.ctrl, event.shift),
        )
    }
}

impl From<&RawKeyEvent> for KeyChord {
    fn from(event: &RawKeyEvent) -> Self {
        KeyChord::from_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_is_ignored() {
        let plain = RawKeyEvent::key(74);
        let with_meta = RawKeyEvent {
            meta: true,
            ..plain
        };
        assert_eq!(KeyChord::from_event(&plain), KeyChord::from_event(&with_meta));
    }

    #[test]
    fn test_modifiers_are_kept() {
        let event = RawKeyEvent {
            code: 74,
            alt: true,
            shift: true,
            ..RawKeyEvent::default()
        };
        let chord = KeyChord::from(&event);
        assert!(chord.mods.alt());
        assert!(chord.mods.shift());
        assert!(!chord.mods.ctrl());
    }

    #[test]
    fn test_from_chord_round_trips_modifiers() {
        let chord = KeyChord::new(75, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(KeyChord::from_event(&RawKeyEvent::from_chord(chord)), chord);
    }
}
