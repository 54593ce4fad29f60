//! Per-frame animation state for the shirt scene.

use glam::{EulerRot, Mat4, Vec2, Vec3};
use shared::Color;

use crate::easing::{DampedColor, DampedVec3, SMOOTH_TIME};

/// Vertical field of view, degrees
pub const FOV_DEGREES: f32 = 25.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 2.5);
pub const CAMERA_REST: Vec3 = Vec3::new(0.0, 0.0, 2.0);

pub const DECAL_POSITION: Vec3 = Vec3::new(0.0, 0.04, 0.15);
pub const DECAL_SCALE: f32 = 0.15;

pub const BACKDROP_Z: f32 = -0.22;
pub const BACKDROP_SCALE: f32 = 12.0;

pub const AMBIENT_INTENSITY: f32 = 0.5;

/// Directional key and fill lights: (position, intensity)
pub const LIGHTS: [(Vec3, f32); 2] = [
    (Vec3::new(5.0, 5.0, -10.0), 0.55),
    (Vec3::new(-5.0, 5.0, -9.0), 0.25),
];

#[derive(Debug, Clone)]
pub struct ShirtRig {
    pub shirt_color: DampedColor,
    pub backdrop_color: DampedColor,
    pub camera: DampedVec3,
    /// Euler XYZ rotation of the shirt group
    pub rotation: DampedVec3,
}

impl ShirtRig {
    pub fn new(color: Color) -> Self {
        Self {
            shirt_color: DampedColor::new(color.rgb()),
            backdrop_color: DampedColor::new(color.rgb()),
            camera: DampedVec3::new(CAMERA_START),
            rotation: DampedVec3::new(Vec3::ZERO),
        }
    }

    /// Advance by `dt` seconds. `pointer` is normalized device coords in [-1, 1].
    /// Returns true while anything is still moving.
    pub fn update(&mut self, dt: f32, target: Color, pointer: Vec2, overlay_hovered: bool) -> bool {
        let rgb = target.rgb();
        let mut moving = self.shirt_color.update(rgb, SMOOTH_TIME, dt);
        moving |= self.backdrop_color.update(rgb, SMOOTH_TIME, dt);
        moving |= self.camera.update(CAMERA_REST, SMOOTH_TIME, dt);
        moving |= self.rotation.update(target_rotation(pointer, overlay_hovered), SMOOTH_TIME, dt);
        moving
    }

    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation.value;
        Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.camera.value, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(FOV_DEGREES.to_radians(), aspect.max(1e-3), 0.1, 100.0)
    }
}

/// Shirt tilts toward the pointer unless an overlay has it
pub fn target_rotation(pointer: Vec2, overlay_hovered: bool) -> Vec3 {
    if overlay_hovered {
        Vec3::ZERO
    } else {
        Vec3::new(pointer.y / 6.0, -pointer.x, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rotation() {
        let r = target_rotation(Vec2::new(0.5, -0.6), false);
        assert!((r - Vec3::new(-0.1, -0.5, 0.0)).length() < 1e-6);
        assert_eq!(target_rotation(Vec2::new(0.5, -0.6), true), Vec3::ZERO);
    }

    #[test]
    fn test_color_eases_toward_selection() {
        let mut rig = ShirtRig::new(Color::White);
        rig.update(0.016, Color::Black, Vec2::ZERO, false);
        let [r, _, _] = rig.shirt_color.rgb();
        assert!(r < Color::White.rgb()[0]);
        assert!(r > Color::Black.rgb()[0]);

        for _ in 0..600 {
            rig.update(0.016, Color::Black, Vec2::ZERO, false);
        }
        assert_eq!(rig.shirt_color.rgb(), Color::Black.rgb());
        assert_eq!(rig.camera.value, CAMERA_REST);
    }

    #[test]
    fn test_settles() {
        let mut rig = ShirtRig::new(Color::Red);
        let mut frames = 0;
        while rig.update(0.016, Color::Red, Vec2::ZERO, true) {
            frames += 1;
            assert!(frames < 1000);
        }
    }
}
