pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use assets::manifest::{BoxDescriptor, LevelManifest, PlayerDescriptor, WorldDescriptor};
pub use components::collision_box::CollisionBox;
pub use components::player::{KeyBindings, Player};
pub use crate::core::level::Level;
pub use crate::core::physics::{
    MovementState, Physics, PhysicsStateMachine, GRAVITY, JUMP_IMPULSE, PLAYER_SPEED,
    TERMINAL_VELOCITY,
};
pub use crate::core::time::FrameClock;
pub use input::keys::{KeyCode, KeyInput, KeyState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::canvas::{Canvas, ColorIndex, RectBuffer, RectInstance};
