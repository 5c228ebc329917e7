//! Movement domain: writes camera feedback onto the pivot and body transforms.

use bevy::prelude::*;

use crate::movement::camera::CameraFeedback;
use crate::movement::{CameraPivot, ControllerDisabled, LocomotionController, PlayerRig};

pub(crate) fn apply_camera_feedback(
    controllers: Query<(&LocomotionController, &PlayerRig), Without<ControllerDisabled>>,
    mut pivots: Query<&mut Transform, With<CameraPivot>>,
) {
    for (controller, rig) in &controllers {
        let Some(pivot) = rig.camera_pivot else {
            continue;
        };
        let Ok(mut transform) = pivots.get_mut(pivot) else {
            continue;
        };
        transform.translation.y = controller.camera.height();
        transform.rotation = CameraFeedback::pivot_rotation(&controller.state);
    }
}
