use wasm_bindgen::prelude::*;

mod game;
use game::PlatformerGame;

hopbox_web::export_game!(PlatformerGame, "platformer");
