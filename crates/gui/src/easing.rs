//! Critically damped easing for colours, camera and rotation.

use glam::Vec3;

/// Default smoothing time in seconds
pub const SMOOTH_TIME: f32 = 0.25;
/// Values closer than this snap to the target
pub const EPSILON: f32 = 1e-3;

fn exp_ease(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// One step of a critically damped spring toward `target`.
///
/// Returns false once the value has settled.
pub fn smooth_damp(current: &mut f32, velocity: &mut f32, target: f32, smooth_time: f32, dt: f32) -> bool {
    if (*current - target).abs() <= EPSILON {
        *current = target;
        *velocity = 0.0;
        return false;
    }
    if dt <= 0.0 {
        return true;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let t = exp_ease(omega * dt);
    let change = *current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * t;
    let mut output = target + (change + temp) * t;

    // No overshoot
    if (target - *current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    *current = output;
    true
}

/// Three channels eased independently
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedVec3 {
    pub value: Vec3,
    velocity: Vec3,
}

impl DampedVec3 {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            velocity: Vec3::ZERO,
        }
    }

    pub fn update(&mut self, target: Vec3, smooth_time: f32, dt: f32) -> bool {
        let mut moving = false;
        for i in 0..3 {
            moving |= smooth_damp(
                &mut self.value[i],
                &mut self.velocity[i],
                target[i],
                smooth_time,
                dt,
            );
        }
        moving
    }
}

/// RGB colour eased per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedColor(DampedVec3);

impl DampedColor {
    pub fn new(rgb: [f32; 3]) -> Self {
        Self(DampedVec3::new(Vec3::from_array(rgb)))
    }

    pub fn rgb(&self) -> [f32; 3] {
        self.0.value.to_array()
    }

    pub fn update(&mut self, target: [f32; 3], smooth_time: f32, dt: f32) -> bool {
        self.0.update(Vec3::from_array(target), smooth_time, dt)
    }
}
