use serde::{Deserialize, Serialize};

use crate::components::player::KeyBindings;
use crate::input::keys::KeyCode;
use crate::renderer::canvas::ColorIndex;

/// Level layout: world bounds, static surfaces, loose boxes and players.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelManifest {
    #[serde(default)]
    pub world: WorldDescriptor,
    /// Static surfaces bodies can land on.
    #[serde(default)]
    pub obstacles: Vec<BoxDescriptor>,
    /// Boxes that fall onto obstacles but take no input.
    #[serde(default)]
    pub bodies: Vec<BoxDescriptor>,
    #[serde(default)]
    pub players: Vec<PlayerDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDescriptor {
    pub width: f32,
    pub height: f32,
    /// Palette index used to clear the screen.
    #[serde(default)]
    pub background: ColorIndex,
}

impl Default for WorldDescriptor {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 120.0,
            background: ColorIndex(0),
        }
    }
}

/// A rectangle, top-left anchored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxDescriptor {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: ColorIndex,
    #[serde(default)]
    pub filled: bool,
    /// Attach gravity to this box.
    #[serde(default)]
    pub physics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDescriptor {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: ColorIndex,
    #[serde(default = "default_filled")]
    pub filled: bool,
    #[serde(default)]
    pub keys: KeysDescriptor,
}

/// Key codes per action; see `KeyCode` for the common ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysDescriptor {
    #[serde(default)]
    pub right: Vec<KeyCode>,
    #[serde(default)]
    pub left: Vec<KeyCode>,
    #[serde(default)]
    pub jump: Vec<KeyCode>,
}

impl Default for KeysDescriptor {
    fn default() -> Self {
        KeyBindings::arrows().into()
    }
}

impl From<KeyBindings> for KeysDescriptor {
    fn from(bindings: KeyBindings) -> Self {
        Self {
            right: bindings.move_x_pos,
            left: bindings.move_x_neg,
            jump: bindings.jump,
        }
    }
}

impl From<&KeysDescriptor> for KeyBindings {
    fn from(keys: &KeysDescriptor) -> Self {
        Self {
            move_x_pos: keys.right.clone(),
            move_x_neg: keys.left.clone(),
            jump: keys.jump.clone(),
        }
    }
}

fn default_filled() -> bool {
    true
}

impl LevelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
