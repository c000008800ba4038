use crate::assets::manifest::{BoxDescriptor, LevelManifest};
use crate::components::collision_box::CollisionBox;
use crate::components::player::{KeyBindings, Player};
use crate::input::keys::KeyInput;
use crate::renderer::canvas::Canvas;

/// Everything that lives in one level.
/// Obstacles never move; bodies and players fall onto them.
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub obstacles: Vec<CollisionBox>,
    pub bodies: Vec<CollisionBox>,
    pub players: Vec<Player>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a level from a parsed manifest. Players always get physics and
    /// a movement state machine.
    pub fn from_manifest(manifest: &LevelManifest) -> Self {
        let obstacles = manifest.obstacles.iter().map(box_from_descriptor).collect();
        let bodies = manifest.bodies.iter().map(box_from_descriptor).collect();
        let players = manifest
            .players
            .iter()
            .map(|p| {
                let body = CollisionBox::new(p.x, p.y, p.w, p.h, p.color)
                    .with_filled(p.filled)
                    .with_physics()
                    .with_state_machine();
                Player::new(body, KeyBindings::from(&p.keys))
            })
            .collect();

        Self {
            obstacles,
            bodies,
            players,
        }
    }

    pub fn add_obstacle(&mut self, obstacle: CollisionBox) {
        self.obstacles.push(obstacle);
    }

    pub fn add_body(&mut self, body: CollisionBox) {
        self.bodies.push(body);
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    /// One frame: player input, then gravity for players and loose bodies.
    pub fn step(&mut self, keys: &impl KeyInput) {
        for player in &mut self.players {
            player.inputs(keys);
            player.fall_onto(&self.obstacles);
        }
        for body in &mut self.bodies {
            body.fall_onto(&self.obstacles);
        }
    }

    /// Obstacles first so moving boxes draw on top.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for obstacle in &self.obstacles {
            obstacle.draw(canvas);
        }
        for body in &self.bodies {
            body.draw(canvas);
        }
        for player in &self.players {
            player.draw(canvas);
        }
    }
}

fn box_from_descriptor(desc: &BoxDescriptor) -> CollisionBox {
    let b = CollisionBox::new(desc.x, desc.y, desc.w, desc.h, desc.color)
        .with_filled(desc.filled);
    if desc.physics {
        b.with_physics()
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::{MovementState, GRAVITY, PLAYER_SPEED};
    use crate::input::keys::{KeyCode, KeyState};
    use crate::input::queue::InputEvent;
    use crate::renderer::canvas::RectBuffer;

    const LEVEL: &str = r#"{
        "obstacles": [ { "x": 0, "y": 100, "w": 160, "h": 20, "color": 3, "filled": true } ],
        "bodies": [
            { "x": 100, "y": 0, "w": 10, "h": 10, "color": 9, "physics": true },
            { "x": 20, "y": 60, "w": 10, "h": 10, "color": 5 }
        ],
        "players": [ { "x": 40, "y": 40, "w": 8, "h": 8, "color": 11 } ]
    }"#;

    fn level() -> Level {
        Level::from_manifest(&LevelManifest::from_json(LEVEL).unwrap())
    }

    fn settle(level: &mut Level, keys: &mut KeyState, frames: usize) {
        for _ in 0..frames {
            level.step(keys);
            keys.end_frame();
        }
    }

    #[test]
    fn from_manifest_builds_every_entity() {
        let level = level();
        assert_eq!(level.obstacles.len(), 1);
        assert_eq!(level.bodies.len(), 2);
        assert!(level.bodies[0].phys.is_some());
        assert!(level.bodies[1].phys.is_none());
        let player = level.player(0).unwrap();
        assert!(player.body.phys.is_some());
        assert_eq!(player.state(), Some(MovementState::Idle));
    }

    #[test]
    fn player_and_bodies_land_on_ground() {
        let mut level = level();
        let mut keys = KeyState::new();
        settle(&mut level, &mut keys, 90);

        let resting_y = 100.0 - 8.0 - GRAVITY;
        let player = level.player(0).unwrap();
        assert_eq!(player.body.pos.y, resting_y);
        assert_eq!(player.state(), Some(MovementState::Idle));
        assert_eq!(level.bodies[0].pos.y, 100.0 - 10.0 - GRAVITY);
        // No physics: stays put.
        assert_eq!(level.bodies[1].pos.y, 60.0);
    }

    #[test]
    fn run_and_jump_across_the_floor() {
        let mut level = level();
        let mut keys = KeyState::new();
        settle(&mut level, &mut keys, 90);

        keys.apply(&InputEvent::key_down(KeyCode::RIGHT));
        level.step(&keys);
        keys.end_frame();
        let player = level.player(0).unwrap();
        assert_eq!(player.body.pos.x, 40.0 + PLAYER_SPEED);
        // Gravity runs after input and reclassifies a grounded body as Idle.
        assert_eq!(player.state(), Some(MovementState::Idle));

        keys.apply(&InputEvent::key_down(KeyCode::SPACE));
        level.step(&keys);
        keys.end_frame();
        let player = level.player(0).unwrap();
        assert_eq!(player.state(), Some(MovementState::Jumping));

        keys.apply(&InputEvent::key_up(KeyCode::RIGHT));
        settle(&mut level, &mut keys, 90);
        let player = level.player(0).unwrap();
        assert_eq!(player.body.pos.y, 100.0 - 8.0 - GRAVITY);
        assert!(player.body.phys.as_ref().unwrap().is_grounded);
    }

    #[test]
    fn draw_orders_obstacles_bodies_players() {
        let level = level();
        let mut canvas = RectBuffer::new();
        level.draw(&mut canvas);
        let colors: Vec<f32> = canvas.rects().iter().map(|r| r.color).collect();
        assert_eq!(colors, vec![3.0, 9.0, 5.0, 11.0]);
    }
}
