pub mod level;
pub mod physics;
pub mod time;
