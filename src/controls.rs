//! Turns key presses into animation changes.
//!
//! The key map is data: [`KEY_BINDINGS`] lists which key ranges trigger which
//! [`Action`]. Releases and unmapped keys do nothing.
//!
//! | keys    | action |
//! |---------|--------|
//! | 0–7     | brightness `(key + 1) * 15` |
//! | 8–19    | preset `key - 8` |
//! | 47      | toggle color loop |
//! | 48–55   | speed from [`STEP_VALUES`] |
//! | 56–63   | scale from [`STEP_VALUES`] |

use core::ops::RangeInclusive;

use crate::config::{AnimationConfig, Brightness};
use crate::rng::Rng16;

// ============================================================================
// Key events
// ============================================================================

/// Key transition reported by the keypad, in seesaw encoding order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Edge {
    /// Key is held.
    High,
    /// Key is up.
    Low,
    /// Key was released.
    Falling,
    /// Key was pressed.
    Rising,
}

impl Edge {
    /// All edges, indexed by their two-bit wire encoding.
    pub const ALL: [Self; 4] = [Self::High, Self::Low, Self::Falling, Self::Rising];

    /// Decode the low two bits of a keypad event byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x03) as usize]
    }

    /// Two-bit wire encoding.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// A key transition at a matrix key number (`y * WIDTH + x`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct KeyEvent {
    /// Matrix key number.
    pub key: u8,
    /// What happened to the key.
    pub edge: Edge,
}

impl KeyEvent {
    /// A press of `key`.
    #[must_use]
    pub const fn pressed(key: u8) -> Self {
        Self {
            key,
            edge: Edge::Rising,
        }
    }

    /// A release of `key`.
    #[must_use]
    pub const fn released(key: u8) -> Self {
        Self {
            key,
            edge: Edge::Falling,
        }
    }
}

// ============================================================================
// Actions and the key map
// ============================================================================

/// A change to the animation requested by a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Action {
    /// Set the global display brightness.
    SetBrightness(Brightness),
    /// Switch to preset number `n`.
    SelectPreset(u8),
    /// Flip the color-loop flag.
    ToggleColorLoop,
    /// Set the noise speed.
    SetSpeed(u16),
    /// Set the noise scale.
    SetScale(u16),
}

/// Values offered by the speed and scale rows, left to right.
pub const STEP_VALUES: [u16; 8] = [2, 4, 8, 16, 32, 64, 128, 256];

/// A range of keys and how a key's offset into that range becomes an action.
#[derive(Clone, Debug)]
pub struct KeyBinding {
    /// Keys covered by this binding.
    pub keys: RangeInclusive<u8>,
    /// Builds the action from `key - keys.start()`.
    pub action: fn(u8) -> Action,
}

impl KeyBinding {
    /// The action for `key`, if this binding covers it.
    #[must_use]
    pub fn action_for(&self, key: u8) -> Option<Action> {
        self.keys
            .contains(&key)
            .then(|| (self.action)(key - self.keys.start()))
    }
}

const fn step_value(offset: u8) -> u16 {
    STEP_VALUES[offset as usize % STEP_VALUES.len()]
}

/// The key map. Ranges do not overlap.
pub const KEY_BINDINGS: [KeyBinding; 5] = [
    KeyBinding {
        keys: RangeInclusive::new(0, 7),
        action: |offset| Action::SetBrightness(Brightness::new((offset + 1) * 15)),
    },
    KeyBinding {
        keys: RangeInclusive::new(8, 19),
        action: Action::SelectPreset,
    },
    KeyBinding {
        keys: RangeInclusive::new(47, 47),
        action: |_| Action::ToggleColorLoop,
    },
    KeyBinding {
        keys: RangeInclusive::new(48, 55),
        action: |offset| Action::SetSpeed(step_value(offset)),
    },
    KeyBinding {
        keys: RangeInclusive::new(56, 63),
        action: |offset| Action::SetScale(step_value(offset)),
    },
];

/// The action a key event asks for, if any. Only presses count.
#[must_use]
pub fn action_for(event: KeyEvent) -> Option<Action> {
    if event.edge != Edge::Rising {
        return None;
    }
    KEY_BINDINGS
        .iter()
        .find_map(|binding| binding.action_for(event.key))
}

/// The config after `event`. Unmapped keys and releases return `config` unchanged.
#[must_use]
pub fn dispatch(config: AnimationConfig, event: KeyEvent, rng: &mut Rng16) -> AnimationConfig {
    action_for(event).map_or(config, |action| config.apply(action, rng))
}
