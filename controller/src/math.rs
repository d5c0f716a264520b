//! Math aliases and yaw/direction helpers shared by the controller modules.
//!
//! Conventions
//! - Y-up, right-handed. A body or camera with yaw 0 faces `-Z`.
//! - Yaw rotates about `+Y`; positive pitch tilts the view downward.
//! - Angles at this layer are radians; the camera rig stores degrees and
//!   converts at the boundary.

use nalgebra as na;

use crate::constants::YAW_EPS_SQ;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Planar (XZ) forward unit vector for a yaw angle (radians).
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(-s, 0.0, -c)
}

/// Yaw angle (radians) that faces the planar direction `dir_xz`.
///
/// Returns `None` if the planar component is too small to define a heading.
/// Inverse of [`forward_from_yaw`]: `yaw = (-x).atan2(-z)`.
#[inline]
pub fn yaw_from_planar(dir_xz: Vec3) -> Option<f32> {
    let len_sq = dir_xz.x * dir_xz.x + dir_xz.z * dir_xz.z;
    if len_sq <= YAW_EPS_SQ {
        return None;
    }
    Some((-dir_xz.x).atan2(-dir_xz.z))
}

/// Yaw-only rotation (about `+Y`) facing the planar direction `dir_xz`,
/// or `None` if the direction is degenerate.
#[inline]
pub fn facing_from_planar(dir_xz: Vec3) -> Option<Quat> {
    yaw_from_planar(dir_xz).map(|yaw| Quat::from_axis_angle(&na::Vector3::y_axis(), yaw))
}

/// Project onto the XZ plane and normalize; `None` for degenerate input.
#[inline]
pub fn flatten(v: Vec3) -> Option<Vec3> {
    let planar = Vec3::new(v.x, 0.0, v.z);
    let len_sq = planar.norm_squared();
    if len_sq <= YAW_EPS_SQ {
        return None;
    }
    Some(planar / len_sq.sqrt())
}
