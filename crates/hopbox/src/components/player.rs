use crate::components::collision_box::CollisionBox;
use crate::core::physics::{MovementState, PLAYER_SPEED};
use crate::input::keys::{KeyCode, KeyInput};
use crate::renderer::canvas::Canvas;

/// Keys bound to each player action. Within a list, order only decides
/// which key is checked first; any one of them triggers the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_x_pos: Vec<KeyCode>,
    pub move_x_neg: Vec<KeyCode>,
    pub jump: Vec<KeyCode>,
}

impl KeyBindings {
    /// Arrow keys to move, space or up to jump.
    pub fn arrows() -> Self {
        Self {
            move_x_pos: vec![KeyCode::RIGHT],
            move_x_neg: vec![KeyCode::LEFT],
            jump: vec![KeyCode::SPACE, KeyCode::UP],
        }
    }

    /// A/D to move, W to jump.
    pub fn wasd() -> Self {
        Self {
            move_x_pos: vec![KeyCode::D],
            move_x_neg: vec![KeyCode::A],
            jump: vec![KeyCode::W],
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::arrows()
    }
}

/// A keyboard-controlled box.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: CollisionBox,
    pub bindings: KeyBindings,
}

impl Player {
    pub fn new(body: CollisionBox, bindings: KeyBindings) -> Self {
        Self { body, bindings }
    }

    /// Apply this frame's keyboard state: horizontal movement, then jump.
    pub fn inputs(&mut self, keys: &impl KeyInput) {
        let start_x = self.body.pos.x;
        let any_down = |list: &[KeyCode]| list.iter().any(|&k| keys.is_key_down(k));
        let any_pressed = |list: &[KeyCode]| list.iter().any(|&k| keys.is_key_pressed(k));

        if any_down(&self.bindings.move_x_pos) {
            self.body.pos.x += PLAYER_SPEED;
        }
        if any_down(&self.bindings.move_x_neg) {
            self.body.pos.x -= PLAYER_SPEED;
        }

        if any_pressed(&self.bindings.jump) {
            if let Some(phys) = self.body.phys.as_mut().filter(|p| p.is_grounded) {
                phys.jump();
                log::debug!("jump from y = {}", self.body.pos.y);
            }
        }

        // Horizontal movement only refines a body that is otherwise at rest.
        if let Some(machine) = self.body.machine.as_mut() {
            if machine.state() == MovementState::Idle {
                if self.body.pos.x > start_x {
                    machine.set(MovementState::RunningRight);
                } else if self.body.pos.x < start_x {
                    machine.set(MovementState::RunningLeft);
                }
            }
        }
    }

    pub fn fall_onto(&mut self, obstacles: &[CollisionBox]) {
        self.body.fall_onto(obstacles);
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        self.body.draw(canvas);
    }

    pub fn state(&self) -> Option<MovementState> {
        self.body.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::{GRAVITY, JUMP_IMPULSE};
    use crate::input::keys::KeyState;
    use crate::input::queue::InputEvent;
    use crate::renderer::canvas::ColorIndex;

    fn player() -> Player {
        let body = CollisionBox::new(50.0, 50.0, 8.0, 8.0, ColorIndex(11))
            .with_filled(true)
            .with_physics()
            .with_state_machine();
        Player::new(body, KeyBindings::arrows())
    }

    fn hold(keys: &mut KeyState, key: KeyCode) {
        keys.apply(&InputEvent::key_down(key));
    }

    #[test]
    fn several_held_keys_move_once() {
        let mut p = player();
        p.bindings.move_x_pos = vec![KeyCode::RIGHT, KeyCode::D];
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::RIGHT);
        hold(&mut keys, KeyCode::D);

        p.inputs(&keys);
        assert_eq!(p.body.pos.x, 50.0 + PLAYER_SPEED);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut p = player();
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::RIGHT);
        hold(&mut keys, KeyCode::LEFT);

        p.inputs(&keys);
        assert_eq!(p.body.pos.x, 50.0);
        assert_eq!(p.state(), Some(MovementState::Idle));
    }

    #[test]
    fn fresh_press_jumps_when_grounded() {
        let mut p = player();
        {
            let phys = p.body.phys.as_mut().unwrap();
            phys.ground();
            phys.dy = 3.0;
        }
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::SPACE);

        p.inputs(&keys);
        let phys = p.body.phys.as_ref().unwrap();
        assert_eq!(phys.dy, JUMP_IMPULSE);
        assert!(!phys.is_grounded);
    }

    #[test]
    fn held_jump_key_does_not_rejump() {
        let mut p = player();
        p.body.phys.as_mut().unwrap().ground();
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::UP);
        keys.end_frame();

        p.inputs(&keys);
        let phys = p.body.phys.as_ref().unwrap();
        assert_eq!(phys.dy, 0.0);
        assert!(phys.is_grounded);
    }

    #[test]
    fn no_jump_while_airborne() {
        let mut p = player();
        p.body.phys.as_mut().unwrap().dy = 2.0;
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::SPACE);

        p.inputs(&keys);
        assert_eq!(p.body.phys.as_ref().unwrap().dy, 2.0);
    }

    #[test]
    fn movement_from_idle_sets_running_state() {
        let mut p = player();
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::RIGHT);
        p.inputs(&keys);
        assert_eq!(p.state(), Some(MovementState::RunningRight));

        let mut p = player();
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::LEFT);
        p.inputs(&keys);
        assert_eq!(p.state(), Some(MovementState::RunningLeft));
    }

    #[test]
    fn movement_does_not_override_airborne_state() {
        let mut p = player();
        p.body.machine.as_mut().unwrap().set(MovementState::Falling);
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::RIGHT);
        p.inputs(&keys);
        assert_eq!(p.state(), Some(MovementState::Falling));
    }

    #[test]
    fn jump_then_fall_reports_jumping() {
        let floor = CollisionBox::new(0.0, 58.0 + GRAVITY, 160.0, 10.0, ColorIndex(3));
        let mut p = player();
        p.body.phys.as_mut().unwrap().ground();
        let mut keys = KeyState::new();
        hold(&mut keys, KeyCode::SPACE);

        p.inputs(&keys);
        p.fall_onto(&[floor]);
        assert_eq!(p.state(), Some(MovementState::Jumping));
        assert!(p.body.pos.y < 50.0);
    }
}
