use hopbox::{
    Canvas, EngineContext, FrameClock, Game, InputEvent, InputQueue, KeyState, RectBuffer,
    RenderContext, WorldDescriptor,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. See `export_game!`.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    keys: KeyState,
    rects: RectBuffer,
    clock: FrameClock,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            game,
            ctx: EngineContext::with_world(WorldDescriptor::from(&config)),
            input: InputQueue::new(),
            keys: KeyState::new(),
            rects: RectBuffer::with_capacity(config.max_rects),
            clock: FrameClock::new(config.fps),
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.redraw();
    }

    /// Queue a key event; it takes effect on the next simulated frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Swap in a level (and its world bounds) from JSON.
    /// A bad manifest is logged and ignored.
    pub fn load_level(&mut self, json: &str) {
        if let Err(err) = self.ctx.load_level(json) {
            log::error!("level manifest rejected: {}", err);
        }
    }

    /// Advance by `dt` seconds of wall time and rebuild the rect buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let frames = self.clock.advance(dt);
        for i in 0..frames {
            if i == 0 {
                self.keys.apply_queue(&mut self.input);
            }
            self.game.update(&mut self.ctx, &self.keys);
            self.keys.end_frame();
            self.ctx.frame += 1;
        }

        if frames > 0 {
            self.redraw();
        }
    }

    fn redraw(&mut self) {
        let world = &self.ctx.world;
        self.rects.clear();
        self.rects.draw_rect(0.0, 0.0, world.width, world.height, world.background, true);
        self.ctx.level.draw(&mut self.rects);

        let mut render_ctx = RenderContext {
            rects: &mut self.rects,
        };
        self.game.render(&self.ctx, &mut render_ctx);
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn rects(&self) -> &RectBuffer {
        &self.rects
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn rects_ptr(&self) -> *const f32 {
        self.rects.rects_ptr()
    }

    pub fn rect_count(&self) -> u32 {
        self.rects.rect_count()
    }

    pub fn max_rects(&self) -> u32 {
        self.rects.capacity() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.ctx.world.width
    }

    pub fn world_height(&self) -> f32 {
        self.ctx.world.height
    }
}
