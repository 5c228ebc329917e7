//! Movement domain: system modules for locomotion updates.

pub(crate) mod camera;
pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;


pub(crate) use camera::apply_camera_feedback;
pub(crate) use input::read_input;
pub(crate) use movement::{simulate_controllers, sync_player_collider};
