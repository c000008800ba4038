pub mod collision_box;
pub mod player;
