use glam::Vec2;
use hopbox::*;

const WORLD_W: f32 = 160.0;
const WORLD_H: f32 = 120.0;
const LEVEL_JSON: &str = include_str!("../level.json");

/// Colour of the eye drawn on the side a player last moved toward.
const EYE_COLOR: ColorIndex = ColorIndex(7);

pub struct PlatformerGame {
    /// Where each player started, for respawning after falling off the world.
    spawns: Vec<Vec2>,
    /// +1.0 facing right, -1.0 facing left.
    facing: Vec<f32>,
}

impl PlatformerGame {
    pub fn new() -> Self {
        Self {
            spawns: Vec::new(),
            facing: Vec::new(),
        }
    }

    /// Used when the bundled level fails to parse.
    fn fallback_level() -> Level {
        let mut level = Level::new();
        let floor = CollisionBox::new(0.0, WORLD_H - 16.0, WORLD_W, 16.0, ColorIndex(3))
            .with_filled(true);
        level.add_obstacle(floor);
        let body = CollisionBox::new(WORLD_W / 2.0, 20.0, 8.0, 8.0, ColorIndex(11))
            .with_filled(true)
            .with_physics()
            .with_state_machine();
        level.add_player(Player::new(body, KeyBindings::arrows()));
        level
    }

    fn respawn_fallen(&mut self, level: &mut Level, world_height: f32) {
        for (player, spawn) in level.players.iter_mut().zip(&self.spawns) {
            if player.body.top() > world_height {
                log::info!("player fell out of the world, respawning at {:?}", spawn);
                player.body.pos = *spawn;
                if let Some(phys) = player.body.phys.as_mut() {
                    *phys = Physics::new();
                }
            }
        }
    }
}

impl Game for PlatformerGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fps: 30,
            world_width: WORLD_W,
            world_height: WORLD_H,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = ctx.load_level(LEVEL_JSON) {
            log::error!("bundled level is invalid ({}), using fallback", err);
            ctx.level = Self::fallback_level();
        }
        self.spawns = ctx.level.players.iter().map(|p| p.body.pos).collect();
        self.facing = vec![1.0; self.spawns.len()];
    }

    fn update(&mut self, ctx: &mut EngineContext, keys: &KeyState) {
        let before: Vec<f32> = ctx.level.players.iter().map(|p| p.body.pos.x).collect();
        ctx.level.step(keys);

        for ((player, x0), facing) in ctx.level.players.iter().zip(before).zip(&mut self.facing) {
            let dx = player.body.pos.x - x0;
            if dx != 0.0 {
                *facing = dx.signum();
            }
        }
        let world_height = ctx.world.height;
        self.respawn_fallen(&mut ctx.level, world_height);
    }

    fn render(&self, ctx: &EngineContext, render: &mut RenderContext) {
        for (player, facing) in ctx.level.players.iter().zip(&self.facing) {
            let b = &player.body;
            let eye_x = if *facing > 0.0 {
                b.right() - 3.0
            } else {
                b.left() + 1.0
            };
            render.rects.draw_rect(eye_x, b.top() + 2.0, 2.0, 2.0, EYE_COLOR, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TALL_WORLD: &str = r#"{
        "world": { "width": 160, "height": 400 },
        "players": [ { "x": 0, "y": 0, "w": 8, "h": 8, "color": 11 } ]
    }"#;

    #[test]
    fn bundled_level_parses() {
        let manifest = LevelManifest::from_json(LEVEL_JSON).unwrap();
        assert_eq!(manifest.world.width, WORLD_W);
        assert_eq!(manifest.players.len(), 2);
    }

    #[test]
    fn players_respawn_after_leaving_the_world() {
        let mut game = PlatformerGame::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        let spawn = game.spawns[0];

        ctx.level.players[0].body.pos = Vec2::new(-50.0, WORLD_H + 10.0);
        game.update(&mut ctx, &KeyState::new());
        assert_eq!(ctx.level.players[0].body.pos, spawn);
    }

    #[test]
    fn respawn_uses_loaded_world_height() {
        let mut game = PlatformerGame::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        ctx.load_level(TALL_WORLD).unwrap();
        assert_eq!(ctx.world.height, 400.0);

        ctx.level.players[0].body.pos = Vec2::new(0.0, WORLD_H + 10.0);
        game.update(&mut ctx, &KeyState::new());
        assert!(ctx.level.players[0].body.pos.y > WORLD_H);
    }

    #[test]
    fn facing_follows_last_movement() {
        let mut game = PlatformerGame::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);

        let mut keys = KeyState::new();
        keys.apply(&InputEvent::key_down(KeyCode::A));
        game.update(&mut ctx, &keys);
        assert_eq!(game.facing[1], -1.0);
        assert_eq!(game.facing[0], 1.0);
    }
}
