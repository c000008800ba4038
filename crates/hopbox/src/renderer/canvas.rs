use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Index into the renderer's fixed 16-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex(pub u8);

/// The drawing primitive the core needs from a graphics backend.
pub trait Canvas {
    /// Draw an axis-aligned rectangle. `filled == false` draws the outline only.
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: ColorIndex, filled: bool);
}

/// Per-rectangle data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Palette index as a float.
    pub color: f32,
    /// 1.0 for filled, 0.0 for outline.
    pub filled: f32,
    _pad: [f32; 2],
}

impl RectInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(x: f32, y: f32, w: f32, h: f32, color: ColorIndex, filled: bool) -> Self {
        Self {
            x,
            y,
            w,
            h,
            color: color.0 as f32,
            filled: if filled { 1.0 } else { 0.0 },
            _pad: [0.0; 2],
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled != 0.0
    }
}

/// Flat list of rectangles drawn this frame.
/// Draws past `capacity` are dropped so the shared buffer never overflows.
pub struct RectBuffer {
    rects: Vec<RectInstance>,
    capacity: usize,
    overflowed: bool,
}

impl RectBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rects: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.overflowed = false;
    }

    pub fn push(&mut self, rect: RectInstance) {
        if self.rects.len() >= self.capacity {
            if !self.overflowed {
                log::warn!(
                    "rect buffer full ({} rects), dropping draws this frame",
                    self.capacity
                );
                self.overflowed = true;
            }
            return;
        }
        self.rects.push(rect);
    }

    pub fn rects(&self) -> &[RectInstance] {
        &self.rects
    }

    pub fn rect_count(&self) -> u32 {
        self.rects.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rect data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.rects)
    }

    /// Raw pointer to rect data for SharedArrayBuffer reads.
    pub fn rects_ptr(&self) -> *const f32 {
        self.rects.as_ptr() as *const f32
    }
}

impl Default for RectBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RectBuffer {
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: ColorIndex, filled: bool) {
        self.push(RectInstance::new(x, y, w, h, color, filled));
    }
}
