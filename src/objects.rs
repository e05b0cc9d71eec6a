//! Objects
//!
//! An [`Object`] places a [`Shape`] in the scene with a transform and a material. Shapes only
//! answer questions in their own canonical frame; the object converts rays and points in and
//! out of that frame.

use std::fmt;
use std::ops::Index;

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::intersections::Intersection;
use crate::materials::{Material, MaterialConfig};
use crate::matrix::{Matrix, MatrixError};
use crate::transforms::TransformConfig;
use crate::utils::{point, vector};
use crate::{Color, Ray, Tuple, EPSILON};

/// Geometry in its own local frame
pub trait Shape: DynClone + fmt::Debug + Send + Sync {
    /// Distances along `ray` where it meets the surface, in no particular order
    fn local_intersect(&self, ray: &Ray) -> Vec<f64>;

    /// Outward unit normal at a point on the surface
    fn local_normal_at(&self, p: &Tuple) -> Tuple;
}

dyn_clone::clone_trait_object!(Shape);

/// Identity assigned by the [`ObjectArena`] that owns the object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// A shape placed in the scene
#[derive(Debug, Clone)]
pub struct Object {
    id: ObjectId,
    shape: Box<dyn Shape>,
    transform: Matrix,
    inverse: Matrix,
    inverse_transpose: Matrix,
    pub material: Material,
}
impl Object {
    fn new(id: ObjectId, shape: Box<dyn Shape>) -> Self {
        Self {
            id,
            shape,
            transform: Matrix::identity(4),
            inverse: Matrix::identity(4),
            inverse_transpose: Matrix::identity(4),
            material: Material::default(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shape(&self) -> &dyn Shape {
        &*self.shape
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Replace the transform; singular matrices are rejected and leave the object unchanged
    pub fn set_transform(&mut self, transform: Matrix) -> Result<(), MatrixError> {
        let inverse = transform.inverse()?;
        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transpose();
        Ok(())
    }

    /// Intersect a world-space ray
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        let local_ray = ray.transform(&self.inverse);
        self.shape
            .local_intersect(&local_ray)
            .into_iter()
            .map(|t| Intersection::new(t, self))
            .collect()
    }

    /// World-space unit normal at a world-space point
    pub fn normal_at(&self, world_point: &Tuple) -> Tuple {
        let local_point = self.inverse * *world_point;
        let local_normal = self.shape.local_normal_at(&local_point);
        let mut world_normal = self.inverse_transpose * local_normal;
        // Translation leaks into w through the inverse-transpose
        world_normal[3] = 0.0;
        world_normal.normalize()
    }

    /// Surface colour at a world-space point, resolving the material's pattern if any
    pub fn color_at(&self, world_point: &Tuple) -> Color {
        match &self.material.pattern {
            Some(pattern) => pattern.value_at_object_point(&(self.inverse * *world_point)),
            None => self.material.color,
        }
    }
}

/// Owns every object in a scene and hands out their identities
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    objects: Vec<Object>,
}
impl ObjectArena {
    /// Add a shape with the identity transform and default material
    pub fn add(&mut self, shape: impl Shape + 'static) -> &mut Object {
        self.push(Box::new(shape))
    }

    fn push(&mut self, shape: Box<dyn Shape>) -> &mut Object {
        let id = ObjectId(self.objects.len());
        debug!(id = id.0, ?shape, "adding object");
        self.objects.push(Object::new(id, shape));
        &mut self.objects[id.0]
    }

    pub fn add_from_config(&mut self, config: ObjectConfig) -> Result<&mut Object, MatrixError> {
        let transform = TransformConfig::compose(&config.transforms);
        // Validate before anything is added
        transform.inverse()?;
        let material = Material::from_config(config.material)?;

        let shape: Box<dyn Shape> = match config.shape {
            ShapeConfig::Sphere => Box::new(Sphere),
            ShapeConfig::Plane => Box::new(Plane),
            ShapeConfig::Cube => Box::new(Cube),
        };
        let obj = self.push(shape);
        obj.set_transform(transform)?;
        obj.material = material;
        Ok(obj)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
impl Index<ObjectId> for ObjectArena {
    type Output = Object;

    fn index(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }
}

/// Unit sphere centred at the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;
impl Shape for Sphere {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        let sphere_to_ray = ray.orig - point(0.0, 0.0, 0.0);
        let a = ray.dir.dot(&ray.dir);
        let b = 2.0 * ray.dir.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;
        let discriminant = b.powi(2) - 4.0 * a * c;
        if discriminant < 0.0 {
            return vec![];
        }

        // A tangent ray still yields two (equal) roots
        let sqrtd = discriminant.sqrt();
        vec![(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
    }

    fn local_normal_at(&self, p: &Tuple) -> Tuple {
        p - point(0.0, 0.0, 0.0)
    }
}

/// The xz plane through the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;
impl Shape for Plane {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        if ray.dir[1].abs() < EPSILON {
            return vec![];
        }
        vec![-ray.orig[1] / ray.dir[1]]
    }

    fn local_normal_at(&self, _p: &Tuple) -> Tuple {
        vector(0.0, 1.0, 0.0)
    }
}

/// Axis-aligned cube spanning -1..1 on every axis
#[derive(Debug, Clone, Copy, Default)]
pub struct Cube;
impl Cube {
    /// Entry and exit distances for the slab of one axis
    fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
        let tmin_numerator = -1.0 - origin;
        let tmax_numerator = 1.0 - origin;
        let (tmin, tmax) = if direction.abs() >= EPSILON {
            (tmin_numerator / direction, tmax_numerator / direction)
        } else {
            (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
        };
        if tmin > tmax {
            (tmax, tmin)
        } else {
            (tmin, tmax)
        }
    }
}
impl Shape for Cube {
    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        let (tmin, tmax) = (0..3)
            .map(|axis| Self::check_axis(ray.orig[axis], ray.dir[axis]))
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(lo, hi), (t0, t1)| {
                (lo.max(t0), hi.min(t1))
            });
        if tmin > tmax {
            return vec![];
        }
        vec![tmin, tmax]
    }

    fn local_normal_at(&self, p: &Tuple) -> Tuple {
        let (x, y, z) = (p[0].abs(), p[1].abs(), p[2].abs());
        let maxc = x.max(y).max(z);
        if maxc == x {
            vector(p[0], 0.0, 0.0)
        } else if maxc == y {
            vector(0.0, p[1], 0.0)
        } else {
            vector(0.0, 0.0, p[2])
        }
    }
}

/// Shape selector for scene files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeConfig {
    Sphere,
    Plane,
    Cube,
}

/// Object config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub shape: ShapeConfig,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
    #[serde(default)]
    pub material: MaterialConfig,
}
