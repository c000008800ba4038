use crate::assets::manifest::{LevelManifest, WorldDescriptor};
use crate::core::level::Level;
use crate::input::keys::KeyState;
use crate::renderer::canvas::{ColorIndex, RectBuffer};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Simulation frames per second (default: 30).
    pub fps: u32,
    /// World width in pixels.
    pub world_width: f32,
    /// World height in pixels.
    pub world_height: f32,
    /// Palette index the screen is cleared to each frame.
    pub background: ColorIndex,
    /// Maximum number of rectangles drawn per frame (default: 256).
    pub max_rects: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            world_width: 160.0,
            world_height: 120.0,
            background: ColorIndex(0),
            max_rects: 256,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the initial level.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed frame. Most games call `ctx.level.step(keys)` here.
    fn update(&mut self, ctx: &mut EngineContext, keys: &KeyState);

    /// Optional pass for extra rectangles drawn over the level.
    /// Draw through `render.rects`, which implements `Canvas`.
    fn render(&self, _ctx: &EngineContext, _render: &mut RenderContext) {}
}

impl From<&GameConfig> for WorldDescriptor {
    fn from(config: &GameConfig) -> Self {
        Self {
            width: config.world_width,
            height: config.world_height,
            background: config.background,
        }
    }
}

/// Mutable engine state, passed to Game::init and Game::update.
#[derive(Default)]
pub struct EngineContext {
    pub level: Level,
    /// World bounds and clear colour. Seeded from `GameConfig`, replaced by
    /// each loaded level.
    pub world: WorldDescriptor,
    /// Frames simulated so far.
    pub frame: u64,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(world: WorldDescriptor) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Replace the current level and world with ones parsed from JSON.
    /// On error both are left untouched.
    pub fn load_level(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = LevelManifest::from_json(json)?;
        self.level = Level::from_manifest(&manifest);
        self.world = manifest.world;
        log::info!(
            "level loaded: {} obstacles, {} bodies, {} players",
            self.level.obstacles.len(),
            self.level.bodies.len(),
            self.level.players.len()
        );
        Ok(())
    }
}

/// Render context for optional custom draw commands.
pub struct RenderContext<'a> {
    pub rects: &'a mut RectBuffer,
}
