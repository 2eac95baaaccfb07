//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable through the watcher in [`loader`]. Movement tunables feed
//! the controller core via [`Settings::motion_config`] and
//! [`Settings::look_config`].

use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::controller::{LookConfig, MotionConfig};

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier, clamped to [0.1, 10] on use
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("run".to_string(), "LShift".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("pause".to_string(), "Escape".to_string());
        m.insert("respawn".to_string(), "R".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("toggle_probe".to_string(), "F2".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Movement tunables handed to the controller core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_walk_speed")]
    pub walk_speed: f32, // Base horizontal speed in units per second
    #[serde(default = "MovementSettings::default_run_multiplier")]
    pub run_multiplier: f32, // Speed multiplier while the run key is held
    #[serde(default = "MovementSettings::default_jump_height")]
    pub jump_height: f32, // Apex height of a jump in world units
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Gravitational acceleration, negative (downward)
    #[serde(default = "MovementSettings::default_ground_probe_distance")]
    pub ground_probe_distance: f32, // How far below the feet ground contact is probed
    #[serde(default = "MovementSettings::default_min_pitch")]
    pub min_pitch: f32, // Most-downward look angle in degrees
    #[serde(default = "MovementSettings::default_max_pitch")]
    pub max_pitch: f32, // Most-upward look angle in degrees
}

impl MovementSettings {
    fn default_walk_speed() -> f32 { 5.0 }
    fn default_run_multiplier() -> f32 { 2.0 }
    fn default_jump_height() -> f32 { 2.0 }
    fn default_gravity() -> f32 { -9.81 }
    fn default_ground_probe_distance() -> f32 { 0.2 }
    fn default_min_pitch() -> f32 { -90.0 }
    fn default_max_pitch() -> f32 { 90.0 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: Self::default_walk_speed(),
            run_multiplier: Self::default_run_multiplier(),
            jump_height: Self::default_jump_height(),
            gravity: Self::default_gravity(),
            ground_probe_distance: Self::default_ground_probe_distance(),
            min_pitch: Self::default_min_pitch(),
            max_pitch: Self::default_max_pitch(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: ControlsSettings::default(),
            movement: MovementSettings::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Movement config for the controller core. Validation happens where
    /// the config is consumed, so a bad file degrades there with a logged
    /// fallback rather than failing the load.
    #[must_use]
    pub fn motion_config(&self) -> MotionConfig {
        MotionConfig {
            walk_speed: self.movement.walk_speed,
            run_multiplier: self.movement.run_multiplier,
            jump_height: self.movement.jump_height,
            gravity: self.movement.gravity,
            ground_probe_distance: self.movement.ground_probe_distance,
        }
    }

    /// Mouse-look config for the controller core.
    #[must_use]
    pub fn look_config(&self) -> LookConfig {
        LookConfig {
            sensitivity: self.controls.mouse_sensitivity,
            min_pitch: self.movement.min_pitch,
            max_pitch: self.movement.max_pitch,
        }
    }

    /// Resolve a bound action to a `KeyCode`, falling back to `default`
    /// when the bind is missing or unparsable.
    #[must_use]
    pub fn keybind(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`)
    /// into a `KeyCode` usable with Bevy's input system.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "F1").
    ///
    /// # Returns
    /// The matching `KeyCode`, or `None` if the string is not recognized.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        if s.len() == 1 {
            let c = s.chars().next()?;
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            // Function keys
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows / navigation
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_falls_back_to_field_defaults() {
        let parsed: Settings =
            ron::from_str("(movement: (walk_speed: 7.5))").unwrap();
        assert_eq!(parsed.movement.walk_speed, 7.5);
        // untouched fields keep their defaults
        assert_eq!(parsed.movement.gravity, -9.81);
        assert_eq!(parsed.controls.mouse_sensitivity, 1.0);
        assert_eq!(parsed.controls.keybinds.get("jump").map(String::as_str), Some("Space"));
    }

    #[test]
    fn keybind_lookup_falls_back_on_garbage() {
        let mut settings = Settings::defaults();
        settings
            .controls
            .keybinds
            .insert("jump".to_string(), "NotAKey".to_string());
        assert_eq!(settings.keybind("jump", KeyCode::Space), KeyCode::Space);
        assert_eq!(settings.keybind("forward", KeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(settings.keybind("run", KeyCode::ShiftLeft), KeyCode::ShiftLeft);
    }

    #[test]
    fn keycode_round_trips_common_identifiers() {
        assert_eq!(Settings::keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(Settings::keycode_from_str("7"), Some(KeyCode::Digit7));
        assert_eq!(Settings::keycode_from_str("Space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("LSHIFT"), Some(KeyCode::ShiftLeft));
        assert_eq!(Settings::keycode_from_str("f2"), Some(KeyCode::F2));
        assert_eq!(Settings::keycode_from_str("??"), None);
    }

    #[test]
    fn configs_map_settings_fields() {
        let settings = Settings::defaults();
        let motion = settings.motion_config();
        assert_eq!(motion.walk_speed, 5.0);
        assert_eq!(motion.run_multiplier, 2.0);
        assert_eq!(motion.gravity, -9.81);

        let look = settings.look_config();
        assert_eq!(look.sensitivity, 1.0);
        assert_eq!(look.min_pitch, -90.0);
        assert_eq!(look.max_pitch, 90.0);
    }
}
