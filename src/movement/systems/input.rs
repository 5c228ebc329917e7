//! Movement domain: input sampling for locomotion.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::core::LookCapture;
use crate::movement::input::RawInput;
use crate::movement::{KeyBindings, MovementInput};

fn axis(keyboard: &ButtonInput<KeyCode>, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative.iter().copied()) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive.iter().copied()) {
        value += 1.0;
    }
    value
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    bindings: Res<KeyBindings>,
    look: Res<LookCapture>,
    mut input: ResMut<MovementInput>,
) {
    let raw = RawInput {
        move_axis: Vec2::new(
            axis(&keyboard, &bindings.left, &bindings.right),
            axis(&keyboard, &bindings.back, &bindings.forward),
        ),
        // Look input only counts while the cursor is captured
        look_delta: if look.captured {
            mouse_motion.delta
        } else {
            Vec2::ZERO
        },
        jump: keyboard.pressed(bindings.jump),
        crouch: keyboard.pressed(bindings.crouch),
        dash: keyboard.pressed(bindings.dash),
    };

    input.frame = input.sampler.sample(raw);
}
