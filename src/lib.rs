pub mod content;
pub mod core;
pub mod movement;
