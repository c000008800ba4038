pub mod keys;
pub mod queue;
