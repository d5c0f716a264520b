//! The physics collaborator: a kinematic capsule over a static Rapier query
//! world.
//!
//! The player controller never touches Rapier directly. It issues
//! `move_position`/`apply_impulse` requests against a [`PhysicsBody`] and
//! receives [`GroundContact`] messages back; everything else (gravity,
//! sweep-and-slide, ground probing) happens here during the fixed tick.

use bevy::prelude::*;
use nalgebra::{Isometry3, UnitQuaternion, UnitVector3, Vector3, point, vector};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::{
    BroadPhaseBvh, Capsule, Collider, ColliderBuilder, ColliderSet, CollisionPipeline, HalfSpace,
    NarrowPhase, QueryFilter, QueryPipeline, Ray, RigidBodyBuilder, RigidBodySet, SharedShape,
};

use crate::world;

/// Gravity magnitude in meters per second squared (positive value).
const GRAVITY_MPS2: f32 = 9.81;

/// Clamp for downward velocity while falling (meters per second, negative).
const TERMINAL_FALL_SPEED: f32 = -55.0;

/// Slight downward bias applied while supported so the controller keeps
/// contact on slopes and small steps (meters per second, negative).
const GROUND_BIAS_VELOCITY: f32 = -0.125;

/// How far below the capsule feet to probe for the surface normal (meters).
const GROUND_PROBE_DISTANCE: f32 = 0.6;

/// Fixed physics rate (Hz).
const FIXED_HZ: f64 = 50.0;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));
    app.add_message::<GroundContact>();
    app.add_systems(Startup, setup);
    app.add_systems(FixedUpdate, step.in_set(PhysicsStepSet));
}

/// Label for the fixed-tick physics step, so controller systems can order
/// themselves before (request queueing) or after (contact draining) it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsStepSet;

/// Collision feedback delivered to the controller: the surface normal of a
/// fresh ground contact.
#[derive(Message, Debug, Clone, Copy)]
pub struct GroundContact {
    pub normal: Vector3<f32>,
}

/// Canonical definition of an immutable world collider.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector3<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes. Kept intentionally small.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space). The normal is derived from the pose as
    /// `rotation * +Y`; `offset_along_normal` shifts it along that normal.
    Plane { offset_along_normal: f32 },
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector3<f32> },
}

/// A kinematic character body: position plus queued movement requests.
///
/// Positions are authoritative here; the render transform follows via
/// interpolation. The controller only ever queues deltas and impulses.
#[derive(Component, Debug)]
pub struct PhysicsBody {
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Capsule center, world space (meters).
    pub translation: Vector3<f32>,
    vertical_velocity: f32,
    supported: bool,
    queued_move: Vector3<f32>,
    queued_impulse: Vector3<f32>,
}

impl PhysicsBody {
    pub fn capsule(translation: Vector3<f32>, radius: f32, half_height: f32) -> Self {
        Self {
            capsule_radius: radius,
            capsule_half_height: half_height,
            translation,
            vertical_velocity: 0.0,
            // Resolved by the first step; a spawn in mid-air just falls.
            supported: false,
            queued_move: Vector3::zeros(),
            queued_impulse: Vector3::zeros(),
        }
    }

    /// Queue a position delta for the next physics step.
    #[inline]
    pub fn move_position(&mut self, delta: Vector3<f32>) {
        self.queued_move += delta;
    }

    /// Queue an impulse for the next physics step (unit mass, so the
    /// vertical component becomes velocity directly).
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vector3<f32>) {
        self.queued_impulse += impulse;
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

/// Static collision scene: fixed bodies + colliders and the broad/narrow
/// phases needed to borrow a `QueryPipeline`. Built once at startup.
#[derive(Resource)]
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl PhysicsWorld {
    /// Build a query world from static collider definitions.
    ///
    /// The input is sorted by `id` before insertion so the same defs always
    /// produce an identical scene.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        for def in defs.into_iter() {
            let iso = Isometry3::from_parts(def.translation.into(), def.rotation);
            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);
            let collider = collider_from_def(&def);
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        // Collision-detection-only pass to initialize the broad/narrow
        // phases for queries; no dynamics are ever stepped.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &(),
            &(),
        );

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
        }
    }

    fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Advance one body by one fixed step, consuming its queued requests.
    ///
    /// Returns the surface normal when this step landed the body (the
    /// unsupported -> supported transition), which is the moment the
    /// controller's ground tracker cares about.
    pub fn step_body(&self, body: &mut PhysicsBody, dt: f32) -> Option<Vector3<f32>> {
        let queued_move = std::mem::replace(&mut body.queued_move, Vector3::zeros());
        let impulse = std::mem::replace(&mut body.queued_impulse, Vector3::zeros());

        if impulse.y != 0.0 {
            body.vertical_velocity += impulse.y;
            body.supported = false;
        }

        if !body.supported {
            // Semi-implicit Euler with a terminal-speed clamp.
            body.vertical_velocity =
                (body.vertical_velocity - GRAVITY_MPS2 * dt).max(TERMINAL_FALL_SPEED);
        }

        let vertical = if body.supported {
            GROUND_BIAS_VELOCITY * dt
        } else {
            body.vertical_velocity * dt
        };
        let desired = queued_move + Vector3::new(0.0, vertical, 0.0);

        let kcc = KinematicCharacterController {
            autostep: Some(CharacterAutostep {
                include_dynamic_bodies: false,
                max_height: CharacterLength::Relative(0.4),
                ..CharacterAutostep::default()
            }),
            offset: CharacterLength::Relative(0.025),
            ..KinematicCharacterController::default()
        };

        let query_pipeline = self.query_pipeline(QueryFilter::only_fixed());
        let correction = kcc.move_shape(
            dt,
            &query_pipeline,
            &Capsule::new_y(body.capsule_half_height, body.capsule_radius),
            &Isometry3::translation(body.translation.x, body.translation.y, body.translation.z),
            desired,
            |_| {},
        );

        body.translation += correction.translation;

        let was_supported = body.supported;
        // Never grounded while the impulse is still carrying the body up.
        body.supported = correction.grounded && body.vertical_velocity <= 0.0;
        if body.supported {
            body.vertical_velocity = 0.0;
        }

        if body.supported && !was_supported {
            return Some(self.ground_normal_under(body).unwrap_or_else(Vector3::y));
        }
        None
    }

    /// Surface normal of the ground directly under the capsule feet, if any
    /// within the probe distance.
    pub fn ground_normal_under(&self, body: &PhysicsBody) -> Option<Vector3<f32>> {
        let feet_y = body.translation.y - (body.capsule_half_height + body.capsule_radius);
        // Start slightly above the feet to avoid starting inside geometry.
        let ray = Ray::new(
            point![body.translation.x, feet_y + 0.02, body.translation.z],
            vector![0.0, -1.0, 0.0],
        );
        self.query_pipeline(QueryFilter::only_fixed())
            .cast_ray_and_get_normal(&ray, GROUND_PROBE_DISTANCE, true)
            .map(|(_handle, hit)| hit.normal)
    }
}

fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // Plane normal from the pose rotation: n = R * +Y, with
            // dist = n . t + offset so the collider sits at the pose.
            let n = def.rotation * Vector3::y();
            let dist = n.dot(&def.translation) + *offset_along_normal;
            let unit_n = UnitVector3::new_normalize(n);
            let halfspace = HalfSpace::new(unit_n);
            ColliderBuilder::new(SharedShape::new(halfspace))
                .translation(unit_n.into_inner() * dist)
                .build()
        }
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }
    }
}

fn setup(mut commands: Commands) {
    commands.insert_resource(PhysicsWorld::build(world::world_statics()));
}

fn step(
    physics: Res<PhysicsWorld>,
    time: Res<Time>,
    mut bodies: Query<&mut PhysicsBody>,
    mut contacts: MessageWriter<GroundContact>,
) {
    let dt = time.delta_secs();
    for mut body in &mut bodies {
        if let Some(normal) = physics.step_body(&mut body, dt) {
            contacts.write(GroundContact { normal });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    fn flat_world() -> PhysicsWorld {
        PhysicsWorld::build(vec![WorldStaticDef {
            id: 0,
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        }])
    }

    fn capsule_above_ground(height: f32) -> PhysicsBody {
        PhysicsBody::capsule(Vector3::new(0.0, height, 0.0), 0.4, 0.5)
    }

    #[test]
    fn dropped_capsule_lands_and_emits_one_contact() {
        let world = flat_world();
        let mut body = capsule_above_ground(3.0);

        let mut contacts = Vec::new();
        for _ in 0..200 {
            if let Some(normal) = world.step_body(&mut body, DT) {
                contacts.push(normal);
            }
        }

        assert_eq!(contacts.len(), 1, "exactly one landing contact");
        assert!(contacts[0].y > 0.99);
        assert!(body.is_supported());
        // Resting height is roughly the capsule half-extent above the plane.
        let feet = body.translation.y - (body.capsule_half_height + body.capsule_radius);
        assert!(feet.abs() < 0.1, "feet at {feet}");
    }

    #[test]
    fn supported_body_stays_put_without_requests() {
        let world = flat_world();
        let mut body = capsule_above_ground(1.0);
        for _ in 0..100 {
            world.step_body(&mut body, DT);
        }
        let settled = body.translation;
        for _ in 0..50 {
            assert!(world.step_body(&mut body, DT).is_none());
        }
        assert!((body.translation - settled).norm() < 1.0e-2);
    }

    #[test]
    fn queued_move_translates_the_body() {
        let world = flat_world();
        let mut body = capsule_above_ground(1.0);
        for _ in 0..100 {
            world.step_body(&mut body, DT);
        }
        let start = body.translation;

        for _ in 0..50 {
            body.move_position(Vector3::new(0.0, 0.0, -2.0 * DT));
            world.step_body(&mut body, DT);
        }

        let moved = body.translation - start;
        assert!((moved.z + 2.0).abs() < 0.05, "moved {moved:?}");
        assert!(moved.x.abs() < 1.0e-3);
    }

    #[test]
    fn impulse_launches_then_lands_again() {
        let world = flat_world();
        let mut body = capsule_above_ground(1.0);
        for _ in 0..100 {
            world.step_body(&mut body, DT);
        }
        assert!(body.is_supported());
        let rest_y = body.translation.y;

        body.apply_impulse(Vector3::new(0.0, 5.0, 0.0));
        assert!(world.step_body(&mut body, DT).is_none());
        assert!(!body.is_supported());

        let mut peak = body.translation.y;
        let mut landing = None;
        for _ in 0..400 {
            if let Some(normal) = world.step_body(&mut body, DT) {
                landing = Some(normal);
                break;
            }
            peak = peak.max(body.translation.y);
        }

        let normal = landing.expect("body must land again");
        assert!(normal.y > 0.99);
        assert!(peak > rest_y + 0.5, "jump arc peaked at {peak}");
        assert!(body.is_supported());
    }

    #[test]
    fn ground_probe_reports_the_plane_normal() {
        let world = flat_world();
        let mut body = capsule_above_ground(1.0);
        for _ in 0..100 {
            world.step_body(&mut body, DT);
        }
        let normal = world.ground_normal_under(&body).expect("ground below");
        assert!(normal.y > 0.99);
    }
}
