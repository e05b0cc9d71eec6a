//! Hit records and the per-hit shading state derived from them

use crate::objects::Object;
use crate::utils::reflect;
use crate::{Ray, Tuple, EPSILON};

/// Represents a hit
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Distance along the ray
    pub t: f64,
    /// Object that was hit
    pub object: &'a Object,
}
impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Object) -> Self {
        Self { t, object }
    }
}
impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.object.id() == other.object.id()
    }
}

/// The visible intersection: lowest non-negative `t`, regardless of ordering
pub fn hit<'x, 'a>(xs: &'x [Intersection<'a>]) -> Option<&'x Intersection<'a>> {
    xs.iter()
        .filter(|i| i.t >= 0.0)
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

/// Sort ascending by `t`
pub fn sort_intersections(xs: &mut [Intersection<'_>]) {
    xs.sort_by(|a, b| a.t.total_cmp(&b.t));
}

/// Shading state for one intersection
#[derive(Debug, Clone, Copy)]
pub struct Computation<'a> {
    pub t: f64,
    pub object: &'a Object,
    /// World-space hit point
    pub point: Tuple,
    /// `point` nudged along the normal; origin for shadow and reflection rays
    pub over_point: Tuple,
    /// `point` nudged against the normal; origin for refraction rays
    pub under_point: Tuple,
    /// Unit vector back toward the ray origin
    pub eye: Tuple,
    /// Surface normal, flipped to face the eye
    pub normal: Tuple,
    pub reflect: Tuple,
    /// The ray started inside the object
    pub inside: bool,
    /// Refractive index of the medium being exited
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}
impl Computation<'_> {
    /// Schlick's approximation of the Fresnel reflectance
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eye.dot(&self.normal);
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));
            if sin2_t > 1.0 {
                // Total internal reflection
                return 1.0;
            }
            cos = (1.0 - sin2_t).sqrt();
        }
        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Derive shading state for `hit` along `ray`
///
/// `xs` is every intersection of the ray with the scene, sorted ascending by `t`; it is walked to
/// find the refractive indices on both sides of the hit surface.
pub fn prepare_computation<'a>(
    hit: &Intersection<'a>,
    ray: &Ray,
    xs: &[Intersection<'a>],
) -> Computation<'a> {
    let point = ray.get(hit.t);
    let eye = -ray.dir.normalize();
    let mut normal = hit.object.normal_at(&point);
    let inside = normal.dot(&eye) < 0.0;
    if inside {
        normal = -normal;
    }
    let (n1, n2) = refractive_indices(hit, xs);

    Computation {
        t: hit.t,
        object: hit.object,
        point,
        over_point: point + normal * EPSILON,
        under_point: point - normal * EPSILON,
        eye,
        normal,
        reflect: reflect(&ray.dir, &normal),
        inside,
        n1,
        n2,
    }
}

/// Indices of the media on the near and far side of `hit`
fn refractive_indices(hit: &Intersection<'_>, xs: &[Intersection<'_>]) -> (f64, f64) {
    let mut containers: Vec<&Object> = Vec::new();
    let mut n1 = 1.0;
    for i in xs {
        let is_hit = i == hit;
        if is_hit {
            n1 = innermost_index(&containers);
        }

        match containers.iter().position(|o| o.id() == i.object.id()) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }

        if is_hit {
            return (n1, innermost_index(&containers));
        }
    }
    (n1, innermost_index(&containers))
}

/// Index of the innermost medium entered so far, or vacuum
fn innermost_index(containers: &[&Object]) -> f64 {
    containers
        .last()
        .map_or(1.0, |o| o.material.refractive_index)
}
