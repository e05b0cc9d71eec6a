//! Patterns: colour as a function of position

use std::fmt;

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

use crate::matrix::{Matrix, MatrixError};
use crate::transforms::TransformConfig;
use crate::utils::SerdeVector;
use crate::{Color, Tuple};

/// Sample a colour at a point in pattern space
pub trait Patterned: DynClone + fmt::Debug + Send + Sync {
    fn value(&self, p: &Tuple) -> Color;
}

dyn_clone::clone_trait_object!(Patterned);

/// A pattern placed in its object's space by its own transform
#[derive(Debug, Clone)]
pub struct Pattern {
    texture: Box<dyn Patterned>,
    transform: Matrix,
    inverse: Matrix,
}
impl Pattern {
    pub fn new(texture: impl Patterned + 'static) -> Self {
        Self {
            texture: Box::new(texture),
            transform: Matrix::identity(4),
            inverse: Matrix::identity(4),
        }
    }

    pub fn with_transform(mut self, transform: Matrix) -> Result<Self, MatrixError> {
        self.set_transform(transform)?;
        Ok(self)
    }

    pub fn set_transform(&mut self, transform: Matrix) -> Result<(), MatrixError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;
        Ok(())
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Colour at a point already in the owning object's space
    pub fn value_at_object_point(&self, object_point: &Tuple) -> Color {
        self.texture.value(&(self.inverse * *object_point))
    }

    pub fn from_config(config: PatternConfig) -> Result<Self, MatrixError> {
        let (texture, transforms): (Box<dyn Patterned>, Vec<TransformConfig>) = match config {
            PatternConfig::Stripe(c) => (Box::new(Stripe::new(c.a.into(), c.b.into())), c.transforms),
            PatternConfig::Gradient(c) => {
                (Box::new(Gradient::new(c.a.into(), c.b.into())), c.transforms)
            }
            PatternConfig::Ring(c) => (Box::new(Ring::new(c.a.into(), c.b.into())), c.transforms),
            PatternConfig::Checker(c) => {
                (Box::new(Checker::new(c.a.into(), c.b.into())), c.transforms)
            }
            PatternConfig::Solid(c) => (Box::new(Solid::new(c.color.into())), c.transforms),
        };
        Self {
            texture,
            transform: Matrix::identity(4),
            inverse: Matrix::identity(4),
        }
        .with_transform(TransformConfig::compose(&transforms))
    }
}

/// Solid Color
#[derive(Debug, Clone)]
pub struct Solid {
    color_value: Color,
}
impl Solid {
    pub fn new(color: Color) -> Self {
        Self { color_value: color }
    }
}
impl Patterned for Solid {
    fn value(&self, _p: &Tuple) -> Color {
        self.color_value
    }
}

/// Alternating bands along x, one unit wide
#[derive(Debug, Clone)]
pub struct Stripe {
    a: Color,
    b: Color,
}
impl Stripe {
    pub fn new(a: Color, b: Color) -> Self {
        Self { a, b }
    }
}
impl Patterned for Stripe {
    fn value(&self, p: &Tuple) -> Color {
        if p[0].floor().rem_euclid(2.0) == 0.0 {
            self.a
        } else {
            self.b
        }
    }
}

/// Linear blend from `a` to `b` across each unit of x
#[derive(Debug, Clone)]
pub struct Gradient {
    a: Color,
    b: Color,
}
impl Gradient {
    pub fn new(a: Color, b: Color) -> Self {
        Self { a, b }
    }
}
impl Patterned for Gradient {
    fn value(&self, p: &Tuple) -> Color {
        let fraction = p[0] - p[0].floor();
        self.a + (self.b - self.a) * fraction
    }
}

/// Concentric rings in the xz plane
#[derive(Debug, Clone)]
pub struct Ring {
    a: Color,
    b: Color,
}
impl Ring {
    pub fn new(a: Color, b: Color) -> Self {
        Self { a, b }
    }
}
impl Patterned for Ring {
    fn value(&self, p: &Tuple) -> Color {
        let distance = (p[0].powi(2) + p[2].powi(2)).sqrt();
        if distance.floor().rem_euclid(2.0) == 0.0 {
            self.a
        } else {
            self.b
        }
    }
}

/// 3D checker of unit cubes
#[derive(Debug, Clone)]
pub struct Checker {
    even: Color,
    odd: Color,
}
impl Checker {
    pub fn new(even: Color, odd: Color) -> Self {
        Self { even, odd }
    }
}
impl Patterned for Checker {
    fn value(&self, p: &Tuple) -> Color {
        let sum = p[0].floor() + p[1].floor() + p[2].floor();
        if sum.rem_euclid(2.0) == 0.0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// Config for patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternConfig {
    Stripe(TwoColorConfig),
    Gradient(TwoColorConfig),
    Ring(TwoColorConfig),
    Checker(TwoColorConfig),
    Solid(SolidConfig),
}

/// Two-colour pattern config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoColorConfig {
    pub a: SerdeVector,
    pub b: SerdeVector,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
}

/// Solid pattern config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidConfig {
    pub color: SerdeVector,
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::{scaling, translation};
    use crate::utils::point;
    use approx::assert_abs_diff_eq;

    fn white() -> Color {
        Color::new(1.0, 1.0, 1.0)
    }

    fn black() -> Color {
        Color::zeros()
    }

    #[test]
    fn stripes_alternate_only_in_x() {
        let pattern = Stripe::new(white(), black());
        for y in [0.0, 1.0, 2.0] {
            assert_eq!(pattern.value(&point(0.0, y, 0.0)), white());
        }
        for z in [0.0, 1.0, 2.0] {
            assert_eq!(pattern.value(&point(0.0, 0.0, z)), white());
        }
        assert_eq!(pattern.value(&point(0.9, 0.0, 0.0)), white());
        assert_eq!(pattern.value(&point(1.0, 0.0, 0.0)), black());
        assert_eq!(pattern.value(&point(-0.1, 0.0, 0.0)), black());
        assert_eq!(pattern.value(&point(-1.0, 0.0, 0.0)), black());
        assert_eq!(pattern.value(&point(-1.1, 0.0, 0.0)), white());
    }

    #[test]
    fn gradient_interpolates_linearly() {
        let pattern = Gradient::new(white(), black());
        assert_abs_diff_eq!(pattern.value(&point(0.0, 0.0, 0.0)), white());
        assert_abs_diff_eq!(
            pattern.value(&point(0.25, 0.0, 0.0)),
            Color::new(0.75, 0.75, 0.75)
        );
        assert_abs_diff_eq!(
            pattern.value(&point(0.75, 0.0, 0.0)),
            Color::new(0.25, 0.25, 0.25)
        );
    }

    #[test]
    fn rings_extend_in_x_and_z() {
        let pattern = Ring::new(white(), black());
        assert_eq!(pattern.value(&point(0.0, 0.0, 0.0)), white());
        assert_eq!(pattern.value(&point(1.0, 0.0, 0.0)), black());
        assert_eq!(pattern.value(&point(0.0, 0.0, 1.0)), black());
        assert_eq!(pattern.value(&point(0.708, 0.0, 0.708)), black());
    }

    #[test]
    fn checkers_repeat_in_every_dimension() {
        let pattern = Checker::new(white(), black());
        assert_eq!(pattern.value(&point(0.99, 0.0, 0.0)), white());
        assert_eq!(pattern.value(&point(1.01, 0.0, 0.0)), black());
        assert_eq!(pattern.value(&point(0.0, 0.99, 0.0)), white());
        assert_eq!(pattern.value(&point(0.0, 1.01, 0.0)), black());
        assert_eq!(pattern.value(&point(0.0, 0.0, 0.99)), white());
        assert_eq!(pattern.value(&point(0.0, 0.0, 1.01)), black());
    }

    #[test]
    fn pattern_transform_is_applied_before_sampling() {
        let pattern = Pattern::new(Stripe::new(white(), black()))
            .with_transform(scaling(2.0, 2.0, 2.0))
            .unwrap();
        assert_eq!(pattern.value_at_object_point(&point(1.5, 0.0, 0.0)), white());

        let shifted = Pattern::new(Stripe::new(white(), black()))
            .with_transform(translation(0.5, 0.0, 0.0))
            .unwrap();
        assert_eq!(shifted.value_at_object_point(&point(1.4, 0.0, 0.0)), white());
        assert_eq!(shifted.value_at_object_point(&point(1.6, 0.0, 0.0)), black());
    }

    #[test]
    fn singular_pattern_transforms_are_rejected() {
        let result = Pattern::new(Solid::new(white())).with_transform(scaling(0.0, 1.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn patterns_from_config() {
        let yaml = "type: stripe\na: [1, 1, 1]\nb: [0, 0, 0]\ntransforms:\n  - { type: scale, x: 2, y: 2, z: 2 }\n";
        let config: PatternConfig = serde_yaml::from_str(yaml).unwrap();
        let pattern = Pattern::from_config(config).unwrap();
        assert_eq!(pattern.transform(), &scaling(2.0, 2.0, 2.0));
        assert_eq!(pattern.value_at_object_point(&point(3.0, 0.0, 0.0)), black());
    }
}
