//! Recursive Whitted-style ray tracing library
//!
//! A scene is a set of transformed primitives owned by an [`objects::ObjectArena`], viewed
//! through a [`world::World`] that borrows them and carries a single point light. Colour is
//! evaluated per ray with local Phong lighting, shadows, reflection and refraction, bounded by a
//! caller-supplied recursion depth.

use nalgebra::{Vector3, Vector4};

pub mod cameras;
pub mod canvas;
pub mod intersections;
pub mod materials;
pub mod matrix;
pub mod objects;
pub mod patterns;
pub mod scene;
pub mod transforms;
pub mod utils;
pub mod world;

use matrix::Matrix;

/// Homogeneous 4-component tuple. `w == 1.0` marks a point, `w == 0.0` a vector.
///
/// `==` is exact; compare computed values with [`utils::tuple_eq`] or [`utils::color_eq`].
pub type Tuple = Vector4<f64>;
/// Linear RGB colour
pub type Color = Vector3<f64>;

/// Tolerance for approximate equality and for the surface bias offset
pub const EPSILON: f64 = 1e-4;

/// Recursion depth used when the caller has no opinion
pub const DEFAULT_DEPTH: u32 = 5;

/// Prelude
pub mod prelude {
    pub use crate::cameras::Camera;
    pub use crate::canvas::Canvas;
    pub use crate::intersections::{hit, prepare_computation, Computation, Intersection};
    pub use crate::materials::{lighting, Light, Material};
    pub use crate::matrix::{Matrix, MatrixError};
    pub use crate::objects::{Cube, Object, ObjectArena, ObjectId, Plane, Shape, Sphere};
    pub use crate::patterns::{Checker, Gradient, Pattern, Patterned, Ring, Solid, Stripe};
    pub use crate::scene::Scene;
    pub use crate::transforms::{
        rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform,
    };
    pub use crate::utils::{color_eq, point, tuple_eq, vector};
    pub use crate::world::World;
    pub use crate::{Color, Ray, Tuple, DEFAULT_DEPTH, EPSILON};
}

/// The ray in ray tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point
    pub orig: Tuple,
    /// Direction vector, not necessarily normalised
    pub dir: Tuple,
}
impl Ray {
    pub fn new(orig: Tuple, dir: Tuple) -> Self {
        Self { orig, dir }
    }

    /// Position along the ray at distance `t`
    pub fn get(&self, t: f64) -> Tuple {
        self.orig + self.dir * t
    }

    /// Apply `m` to both origin and direction
    pub fn transform(&self, m: &Matrix) -> Self {
        Self::new(*m * self.orig, *m * self.dir)
    }
}
