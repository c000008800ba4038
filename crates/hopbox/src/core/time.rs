/// Most frames a single `advance` call will ask for. Time beyond this is dropped
/// so a stalled tab does not replay seconds of gameplay at once.
pub const MAX_CATCH_UP_FRAMES: u32 = 5;

/// Converts variable wall-clock deltas into a whole number of fixed frames.
/// Game logic is expressed per frame (velocities are units/frame), so the
/// clock decides how many frames to simulate, never how far.
pub struct FrameClock {
    frame_dt: f32,
    carry: f32,
    frames_elapsed: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_dt: 1.0 / fps.max(1) as f32,
            carry: 0.0,
            frames_elapsed: 0,
        }
    }

    /// Add `dt` seconds. Returns the number of frames to simulate now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.carry += dt.max(0.0);
        let mut frames = (self.carry / self.frame_dt) as u32;
        if frames > MAX_CATCH_UP_FRAMES {
            log::debug!(
                "frame clock behind by {} frames, skipping",
                frames - MAX_CATCH_UP_FRAMES
            );
            frames = MAX_CATCH_UP_FRAMES;
            self.carry = 0.0;
        } else {
            self.carry -= frames as f32 * self.frame_dt;
        }
        self.frames_elapsed += frames as u64;
        frames
    }

    /// Seconds per frame.
    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }
}
