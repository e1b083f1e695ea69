//! Board and physics configuration
//!
//! Stored as JSON. Every field has a default, so a config file only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BoardError, ConfigError};

/// Ready-made board layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardPreset {
    Compact,
    #[default]
    Classic,
    Tall,
}

impl BoardPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPreset::Compact => "Compact",
            BoardPreset::Classic => "Classic",
            BoardPreset::Tall => "Tall",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "small" => Some(BoardPreset::Compact),
            "classic" | "default" => Some(BoardPreset::Classic),
            "tall" => Some(BoardPreset::Tall),
            _ => None,
        }
    }

    /// Board layout for this preset
    pub fn board(&self) -> BoardConfig {
        let base = BoardConfig::default();
        match self {
            BoardPreset::Compact => BoardConfig {
                rows: 8,
                ..base
            },
            BoardPreset::Classic => base,
            BoardPreset::Tall => BoardConfig {
                rows: 20,
                chute_height: 90.0,
                ..base
            },
        }
    }
}

/// Static board layout. Pins, walls and slots are all derived from this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pins in the first (narrowest) row
    pub top_row_pins: u32,
    /// Number of pin rows; each row has one more pin than the last
    pub rows: u32,
    /// Horizontal distance between pin centers
    pub pin_spacing: f32,
    /// Vertical distance between pin rows
    pub row_spacing: f32,
    /// Height of the entry chute, i.e. y of the first pin row
    pub chute_height: f32,
    /// Height of the scoring slot band
    pub slot_height: f32,
    /// Distance from the outermost pin to the side wall
    pub boundary_margin: f32,
    /// Fraction of the lattice width added on each side of the board
    pub side_padding: f32,
    /// Fraction of a pin spacing covered by a slot
    pub slot_width_ratio: f32,
    pub pin_radius: f32,
    pub ball_radius: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            top_row_pins: TOP_ROW_PINS,
            rows: PIN_ROWS,
            pin_spacing: PIN_SPACING,
            row_spacing: ROW_SPACING,
            chute_height: CHUTE_HEIGHT,
            slot_height: SLOT_HEIGHT,
            boundary_margin: PIN_SPACING,
            side_padding: SIDE_PADDING,
            slot_width_ratio: SLOT_WIDTH_RATIO,
            pin_radius: PIN_RADIUS,
            ball_radius: BALL_RADIUS,
        }
    }
}

impl BoardConfig {
    /// Pins in the last (widest) row
    pub fn bottom_row_pins(&self) -> u32 {
        self.top_row_pins.saturating_add(self.rows).saturating_sub(1)
    }

    /// Reject layouts that cannot form a board
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.top_row_pins == 0 || self.rows == 0 {
            return Err(BoardError::TooFewPins {
                top_row_pins: self.top_row_pins,
                rows: self.rows,
            });
        }
        in_range("top_row_pins", self.top_row_pins as f32, 1.0, MAX_LATTICE_DIM as f32)?;
        in_range("rows", self.rows as f32, 1.0, MAX_LATTICE_DIM as f32)?;
        if self.bottom_row_pins() < 2 {
            return Err(BoardError::NoSlots {
                bottom_row_pins: self.bottom_row_pins(),
            });
        }

        positive("pin_spacing", self.pin_spacing)?;
        positive("row_spacing", self.row_spacing)?;
        positive("slot_height", self.slot_height)?;
        positive("pin_radius", self.pin_radius)?;
        positive("ball_radius", self.ball_radius)?;
        positive("chute_height", self.chute_height)?;

        in_range("boundary_margin", self.boundary_margin, 0.0, f32::MAX)?;
        in_range("side_padding", self.side_padding, 0.0, 10.0)?;
        // A zero-width slot could never be landed in
        in_range("slot_width_ratio", self.slot_width_ratio, f32::EPSILON, 1.0)?;
        Ok(())
    }
}

/// Per-tick physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, pixels/tick²
    pub gravity: f32,
    /// Speed multiplier applied on pin contact
    pub pin_damping: f32,
    /// Downward speed given to a ball that lands in a slot while not falling
    pub settle_speed: f32,
    /// How long a slot glows after a score
    pub highlight_ticks: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            pin_damping: PIN_DAMPING,
            settle_speed: SETTLE_SPEED,
            highlight_ticks: HIGHLIGHT_TICKS,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), BoardError> {
        in_range("gravity", self.gravity, 0.0, f32::MAX)?;
        in_range("pin_damping", self.pin_damping, f32::EPSILON, 1.0)?;
        positive("settle_speed", self.settle_speed)?;
        Ok(())
    }
}

/// Everything needed to start a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for drop jitter and shake impulses
    pub seed: u64,
    pub board: BoardConfig,
    pub physics: PhysicsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            board: BoardConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl SimConfig {
    /// Config for a preset layout with default physics
    pub fn from_preset(preset: BoardPreset, seed: u64) -> Self {
        Self {
            seed,
            board: preset.board(),
            physics: PhysicsConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        self.board.validate()?;
        self.physics.validate()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            log::warn!("Rejected config: {}", e);
            return Err(e.into());
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}

// NaN fails both checks below
fn positive(field: &'static str, value: f32) -> Result<(), BoardError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BoardError::NonPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), BoardError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(BoardError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert_eq!(BoardConfig::default().bottom_row_pins(), 17);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [BoardPreset::Compact, BoardPreset::Classic, BoardPreset::Tall] {
            let config = SimConfig::from_preset(preset, 1);
            assert!(config.validate().is_ok(), "{} should be valid", preset.as_str());
            assert_eq!(BoardPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(BoardPreset::from_str("huge"), None);
    }

    #[test]
    fn test_rejects_single_pin_board() {
        let board = BoardConfig {
            top_row_pins: 1,
            rows: 1,
            ..Default::default()
        };
        assert_eq!(
            board.validate(),
            Err(BoardError::NoSlots { bottom_row_pins: 1 })
        );
    }

    #[test]
    fn test_rejects_oversized_lattice() {
        let err = SimConfig::from_json(r#"{ "board": { "top_row_pins": 4294967295 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(BoardError::OutOfRange {
                field: "top_row_pins",
                ..
            })
        ));

        let board = BoardConfig {
            rows: 70_000,
            ..Default::default()
        };
        assert!(matches!(
            board.validate(),
            Err(BoardError::OutOfRange { field: "rows", .. })
        ));

        let board = BoardConfig {
            top_row_pins: MAX_LATTICE_DIM,
            rows: MAX_LATTICE_DIM,
            ..Default::default()
        };
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_spacing() {
        let board = BoardConfig {
            pin_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            board.validate(),
            Err(BoardError::NonPositive {
                field: "pin_spacing",
                ..
            })
        ));

        let board = BoardConfig {
            row_spacing: f32::NAN,
            ..Default::default()
        };
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_damping() {
        let physics = PhysicsConfig {
            pin_damping: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            physics.validate(),
            Err(BoardError::OutOfRange {
                field: "pin_damping",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "board": { "rows": 10 } }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.board.rows, 10);
        assert_eq!(config.board.top_row_pins, TOP_ROW_PINS);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        let err = SimConfig::from_json(r#"{ "board": { "top_row_pins": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(BoardError::TooFewPins { .. })));

        let err = SimConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig::from_preset(BoardPreset::Tall, 42);
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }
}
