//! The world: borrowed objects plus one light, and the recursive colour evaluation over them
//!
//! Every colour query takes `remaining`, the number of further reflection/refraction bounces
//! allowed. Each nested ray is traced with `remaining - 1` and nothing recurses at zero, so a
//! top-level ray costs at most `remaining` levels of scene intersection.

use crate::intersections::{hit, prepare_computation, sort_intersections, Computation, Intersection};
use crate::materials::{lighting, Light, Material};
use crate::matrix::MatrixError;
use crate::objects::{Object, ObjectArena, Sphere};
use crate::transforms::scaling;
use crate::utils::point;
use crate::{Color, Ray, Tuple};

/// Non-owning view of a scene. The objects belong to whoever built them, usually an
/// [`ObjectArena`], and must outlive the world.
#[derive(Debug, Clone)]
pub struct World<'a> {
    objects: Vec<&'a Object>,
    pub light: Light,
}
impl<'a> World<'a> {
    /// A world with no objects
    pub fn new(light: Light) -> Self {
        Self {
            objects: Vec::new(),
            light,
        }
    }

    /// A world over every object in `arena`, in insertion order
    pub fn from_arena(arena: &'a ObjectArena, light: Light) -> Self {
        Self {
            objects: arena.iter().collect(),
            light,
        }
    }

    pub fn add(&mut self, object: &'a Object) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[&'a Object] {
        &self.objects
    }

    /// Every intersection of `ray` with every object, sorted ascending by `t`
    ///
    /// Nothing is culled: refraction needs the full list to track which objects contain the hit.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection<'a>> {
        let mut xs: Vec<Intersection<'a>> = self
            .objects
            .iter()
            .flat_map(|obj| obj.intersect(ray))
            .collect();
        sort_intersections(&mut xs);
        xs
    }

    /// Whether something sits between `point` and the light
    pub fn is_shadowed(&self, point: &Tuple) -> bool {
        let to_light = self.light.position - point;
        let distance = to_light.magnitude();
        let ray = Ray::new(*point, to_light.normalize());
        let xs = self.intersect(&ray);
        hit(&xs).is_some_and(|h| h.t < distance)
    }

    /// Colour at a prepared hit: local lighting plus reflected and refracted light
    pub fn shade_hit(&self, comps: &Computation<'_>, remaining: u32) -> Color {
        let shadowed = self.is_shadowed(&comps.over_point);
        let surface = lighting(
            comps.object,
            &self.light,
            &comps.over_point,
            &comps.eye,
            &comps.normal,
            shadowed,
        );
        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        let material = &comps.object.material;
        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Light arriving along the mirror direction, scaled by the material's reflectivity
    pub fn reflected_color(&self, comps: &Computation<'_>, remaining: u32) -> Color {
        let reflective = comps.object.material.reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::zeros();
        }
        let reflect_ray = Ray::new(comps.over_point, comps.reflect);
        self.color_at(&reflect_ray, remaining - 1) * reflective
    }

    /// Light arriving through the surface, scaled by the material's transparency
    pub fn refracted_color(&self, comps: &Computation<'_>, remaining: u32) -> Color {
        let transparency = comps.object.material.transparency;
        if remaining == 0 || transparency == 0.0 {
            return Color::zeros();
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eye.dot(&comps.normal);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));
        if sin2_t > 1.0 {
            // Total internal reflection
            return Color::zeros();
        }
        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normal * (n_ratio * cos_i - cos_t) - comps.eye * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);
        self.color_at(&refract_ray, remaining - 1) * transparency
    }

    /// Colour seen along `ray`; black when it hits nothing
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match hit(&xs) {
            Some(h) => {
                let comps = prepare_computation(h, ray, &xs);
                self.shade_hit(&comps, remaining)
            }
            None => Color::zeros(),
        }
    }
}

/// Light of the default world: white, up and to the left of the origin
pub fn default_light() -> Light {
    Light::new(point(-10.0, 10.0, -10.0), Color::new(1.0, 1.0, 1.0))
}

/// Objects of the default world: two spheres centred on the origin, the inner one half size
pub fn default_arena() -> Result<ObjectArena, MatrixError> {
    let mut arena = ObjectArena::default();
    arena.add(Sphere).material = Material {
        color: Color::new(0.8, 1.0, 0.6),
        diffuse: 0.7,
        specular: 0.2,
        ..Default::default()
    };
    arena.add(Sphere).set_transform(scaling(0.5, 0.5, 0.5))?;
    Ok(arena)
}
