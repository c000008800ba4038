use glam::Vec2;

use crate::core::physics::{MovementState, Physics, PhysicsStateMachine, GRAVITY};
use crate::renderer::canvas::{Canvas, ColorIndex};

/// An axis-aligned rectangle with optional physics.
/// `pos` is the top-left corner in Y-down screen space.
#[derive(Debug, Clone)]
pub struct CollisionBox {
    pub pos: Vec2,
    /// Width and height.
    pub size: Vec2,
    pub color: ColorIndex,
    /// Filled rectangle, or outline only.
    pub filled: bool,
    /// Boxes without physics never move on their own.
    pub phys: Option<Physics>,
    /// Receives movement-state classification from `phys`.
    pub machine: Option<PhysicsStateMachine>,
}

impl CollisionBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32, color: ColorIndex) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
            filled: false,
            phys: None,
            machine: None,
        }
    }

    // -- Builder pattern --

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn with_physics(mut self) -> Self {
        self.phys = Some(Physics::new());
        self
    }

    pub fn with_state_machine(mut self) -> Self {
        self.machine = Some(PhysicsStateMachine::new());
        self
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Current movement state, if this box carries a state machine.
    pub fn state(&self) -> Option<MovementState> {
        self.machine.as_ref().map(|m| m.state())
    }

    /// Does `other` straddle this box's top edge?
    ///
    /// Only boxes with physics can land. A landing body still moving down is
    /// knocked back to rest just above the surface and grounded.
    ///
    /// Horizontal overlap only checks whether one of `other`'s vertical edges
    /// lies inside this box's span, so a narrow surface entirely under a wider
    /// `other` does not register.
    pub fn is_colliding_top(&self, other: &mut CollisionBox) -> bool {
        let straddles_top = other.bottom() >= self.top() && other.top() <= self.top();
        let right_edge_inside = self.left() <= other.right() && self.right() >= other.right();
        let left_edge_inside = self.left() <= other.left() && self.right() >= other.left();

        if !straddles_top || !(right_edge_inside || left_edge_inside) {
            return false;
        }
        let Some(phys) = other.phys.as_mut() else {
            return false;
        };

        log::debug!("landing contact at ({}, {})", other.pos.x, self.top());
        if phys.dy > 0.0 {
            phys.ground();
            other.pos.y = self.top() - other.size.y - GRAVITY;
        }
        true
    }

    /// Advance one frame of vertical motion.
    ///
    /// `collider` is asked twice: before the move to decide whether gravity
    /// applies, and after the move so any landing is resolved. Its second
    /// answer is ignored.
    pub fn fall(&mut self, mut collider: impl FnMut(&mut CollisionBox) -> bool) {
        if self.phys.is_none() {
            return;
        }

        let is_colliding = collider(self);
        if let Some(phys) = self.phys.as_mut() {
            phys.fall(is_colliding, self.machine.as_mut());
            self.pos.y += phys.dy;
        }
        collider(self);
    }

    /// `fall` against a set of static surfaces. The first surface that reports
    /// contact wins.
    pub fn fall_onto(&mut self, obstacles: &[CollisionBox]) {
        self.fall(|body| obstacles.iter().any(|o| o.is_colliding_top(body)));
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_rect(
            self.pos.x,
            self.pos.y,
            self.size.x,
            self.size.y,
            self.color,
            self.filled,
        );
    }
}
