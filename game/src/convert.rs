//! Conversions between the engine's math types and the nalgebra types the
//! controller and physics layers work in.

use bevy::prelude::{Quat, Vec3};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

#[inline]
pub fn to_bevy_vec3(v: Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_vec3(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_bevy_quat(q: UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
pub fn to_na_quat(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_round_trip_preserves_rotation() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.2);
        let back = to_na_quat(to_bevy_quat(q));
        assert!(q.angle_to(&back) < 1.0e-6);
    }

    #[test]
    fn vec_round_trip() {
        let v = Vector3::new(1.0, -2.5, 3.75);
        assert_eq!(to_na_vec3(to_bevy_vec3(v)), v);
    }
}
