//! Surface materials, the point light and Phong lighting

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matrix::MatrixError;
use crate::objects::Object;
use crate::patterns::{Pattern, PatternConfig};
use crate::utils::{color_eq, reflect, tuple_eq, SerdeVector};
use crate::{Color, Tuple};

/// Phong surface description plus the reflection/refraction coefficients
#[derive(Debug, Clone)]
pub struct Material {
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    /// 0 is matte, 1 is a perfect mirror
    pub reflective: f64,
    /// 0 is opaque
    pub transparency: f64,
    /// At least 1.0 (vacuum)
    pub refractive_index: f64,
    /// Shared between materials; overrides `color` when present
    pub pattern: Option<Arc<Pattern>>,
}
impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(1.0, 1.0, 1.0),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            pattern: None,
        }
    }
}
impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        color_eq(&self.color, &other.color)
            && self.ambient == other.ambient
            && self.diffuse == other.diffuse
            && self.specular == other.specular
            && self.shininess == other.shininess
            && self.reflective == other.reflective
            && self.transparency == other.transparency
            && self.refractive_index == other.refractive_index
    }
}
impl Material {
    /// Clear glass
    pub fn glass() -> Self {
        Self {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: Arc<Pattern>) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn from_config(config: MaterialConfig) -> Result<Self, MatrixError> {
        let pattern = config
            .pattern
            .map(Pattern::from_config)
            .transpose()?
            .map(Arc::new);
        Ok(Self {
            color: config.color.into(),
            ambient: config.ambient,
            diffuse: config.diffuse,
            specular: config.specular,
            shininess: config.shininess,
            reflective: config.reflective,
            transparency: config.transparency,
            refractive_index: config.refractive_index,
            pattern,
        })
    }
}

/// Material Config
///
/// Omitted keys take the [`Material::default`] values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub color: SerdeVector,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
    pub pattern: Option<PatternConfig>,
}
impl Default for MaterialConfig {
    fn default() -> Self {
        let m = Material::default();
        Self {
            color: SerdeVector([m.color[0], m.color[1], m.color[2]]),
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            reflective: m.reflective,
            transparency: m.transparency,
            refractive_index: m.refractive_index,
            pattern: None,
        }
    }
}

/// A point light with no size
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Tuple,
    pub intensity: Color,
}
impl PartialEq for Light {
    fn eq(&self, other: &Self) -> bool {
        tuple_eq(&self.position, &other.position) && color_eq(&self.intensity, &other.intensity)
    }
}
impl Light {
    pub fn new(position: Tuple, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn from_config(config: LightConfig) -> Self {
        Self::new(config.position.to_point(), config.intensity.into())
    }
}

/// Light Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub position: SerdeVector,
    pub intensity: SerdeVector,
}

/// Phong lighting of `object` at `point` seen along `eye` with surface `normal`
///
/// Only the ambient term survives when the point is in shadow or the light is behind the surface.
pub fn lighting(
    object: &Object,
    light: &Light,
    point: &Tuple,
    eye: &Tuple,
    normal: &Tuple,
    in_shadow: bool,
) -> Color {
    let material = &object.material;
    let effective_color = object.color_at(point).component_mul(&light.intensity);
    let ambient = effective_color * material.ambient;
    if in_shadow {
        return ambient;
    }

    let lightv = (light.position - point).normalize();
    let light_dot_normal = lightv.dot(normal);
    if light_dot_normal <= 0.0 {
        return ambient;
    }
    let diffuse = effective_color * material.diffuse * light_dot_normal;

    let reflectv = reflect(&-lightv, normal);
    let reflect_dot_eye = reflectv.dot(eye);
    let specular = if reflect_dot_eye <= 0.0 {
        Color::zeros()
    } else {
        light.intensity * material.specular * reflect_dot_eye.powf(material.shininess)
    };

    ambient + diffuse + specular
}
