pub mod runner;

pub use hopbox;
pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates `thread_local!` storage for the GameRunner, a `with_runner()`
/// helper, and the wasm-bindgen exports: `game_init`, `game_tick`, key
/// handlers, `game_load_level` and the rect buffer accessors.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// hopbox_web::export_game!(MyGame, "my-game");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log`
/// and `console_error_panic_hook`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            let event = $crate::hopbox::InputEvent::key_down($crate::hopbox::KeyCode(key_code));
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            let event = $crate::hopbox::InputEvent::key_up($crate::hopbox::KeyCode(key_code));
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_load_level(json: &str) {
            with_runner(|r| r.load_level(json));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_rects_ptr() -> *const f32 {
            with_runner(|r| r.rects_ptr())
        }

        #[wasm_bindgen]
        pub fn get_rect_count() -> u32 {
            with_runner(|r| r.rect_count())
        }

        #[wasm_bindgen]
        pub fn get_max_rects() -> u32 {
            with_runner(|r| r.max_rects())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }
    };
}
