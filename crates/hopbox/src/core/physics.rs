/// Downward acceleration added to `dy` every frame (units per frame²).
pub const GRAVITY: f32 = 0.5;
/// Maximum downward velocity (units per frame).
pub const TERMINAL_VELOCITY: f32 = 8.0;
/// Horizontal distance a player moves per frame while a move key is held.
pub const PLAYER_SPEED: f32 = 4.0;
/// Vertical velocity applied on jump. Negative is up (Y-down screen space).
pub const JUMP_IMPULSE: f32 = -10.0;

/// Coarse movement state of a body, updated once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Falling,
    Jumping,
    RunningLeft,
    RunningRight,
}

/// Holds the current movement state.
/// Transitions are driven from outside: `Physics::fall` classifies vertical
/// motion, `Player::inputs` promotes Idle to a running state.
#[derive(Debug, Clone, Default)]
pub struct PhysicsStateMachine {
    state: MovementState,
}

impl PhysicsStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn set(&mut self, state: MovementState) {
        if self.state != state {
            log::trace!("movement state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }
}

/// Vertical motion of a single body.
#[derive(Debug, Clone)]
pub struct Physics {
    /// Vertical velocity in units per frame (positive is down).
    pub dy: f32,
    /// Resting on a surface.
    pub is_grounded: bool,
    /// Gravity was applied on the last tick.
    pub is_falling: bool,
}

impl Physics {
    /// A body starts airborne at rest.
    pub fn new() -> Self {
        Self {
            dy: 0.0,
            is_grounded: false,
            is_falling: true,
        }
    }

    /// Put the body at rest on a surface.
    pub fn ground(&mut self) {
        self.dy = 0.0;
        self.is_grounded = true;
        self.is_falling = false;
    }

    /// Leave the ground with `JUMP_IMPULSE`.
    pub fn jump(&mut self) {
        self.is_grounded = false;
        self.dy = JUMP_IMPULSE;
    }

    /// Advance one tick.
    ///
    /// `is_colliding` is the collider's answer before the body moves. When a
    /// state machine is supplied it receives the Falling / Jumping / Idle
    /// classification for this tick.
    pub fn fall(&mut self, is_colliding: bool, machine: Option<&mut PhysicsStateMachine>) {
        if self.is_grounded && !self.is_falling {
            self.ground();
        }

        let state = if self.dy >= GRAVITY {
            self.is_grounded = false;
            MovementState::Falling
        } else if self.dy < 0.0 {
            MovementState::Jumping
        } else {
            MovementState::Idle
        };
        if let Some(machine) = machine {
            machine.set(state);
        }

        if !is_colliding || !self.is_grounded {
            self.is_falling = true;
            self.dy = (self.dy + GRAVITY).min(TERMINAL_VELOCITY);
        }
    }
}

impl Default for Physics {
    fn default() -> Self {
        Self::new()
    }
}
