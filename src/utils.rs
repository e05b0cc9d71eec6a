//! Utils

use approx::AbsDiffEq;
use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{Color, Tuple, EPSILON};

/// Build a point (`w = 1`)
pub fn point(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 1.0)
}

/// Build a vector (`w = 0`)
pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 0.0)
}

/// Component-wise equality within [`EPSILON`]
pub fn tuple_eq(a: &Tuple, b: &Tuple) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Channel-wise equality within [`EPSILON`]
pub fn color_eq(a: &Color, b: &Color) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

pub fn is_point(t: &Tuple) -> bool {
    t[3] == 1.0
}

pub fn is_vector(t: &Tuple) -> bool {
    t[3] == 0.0
}

/// Cross product of the xyz parts; the result is always a vector
pub fn cross(a: &Tuple, b: &Tuple) -> Tuple {
    vector(
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    )
}

/// Reflect `incoming` about `normal`
pub fn reflect(incoming: &Tuple, normal: &Tuple) -> Tuple {
    incoming - normal * 2.0 * incoming.dot(normal)
}

/// Convert a colour to an 8-bit pixel, clamping each channel to [0, 255]
pub fn get_pixel(color: &Color) -> Rgb<u8> {
    Rgb([
        scale_color(color[0]),
        scale_color(color[1]),
        scale_color(color[2]),
    ])
}

/// Scale a [0, 1] channel to a rounded, clamped 0-255 integer
pub fn scale_color(val: f64) -> u8 {
    (255.0 * val).round().clamp(0.0, 255.0) as u8
}

/// A plain `[x, y, z]` triple as it appears in scene files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerdeVector(pub [f64; 3]);
impl SerdeVector {
    pub fn to_point(self) -> Tuple {
        let [x, y, z] = self.0;
        point(x, y, z)
    }

    pub fn to_vector(self) -> Tuple {
        let [x, y, z] = self.0;
        vector(x, y, z)
    }
}
impl From<SerdeVector> for Color {
    fn from(v: SerdeVector) -> Self {
        Color::from(v.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn points_and_vectors_are_told_apart_by_w() {
        let p = point(4.3, -4.2, 3.1);
        assert!(is_point(&p));
        assert!(!is_vector(&p));

        let v = vector(4.3, -4.2, 3.1);
        assert!(is_vector(&v));
        assert!(!is_point(&v));
    }

    #[test]
    fn tuples_and_colours_compare_within_epsilon() {
        assert!(tuple_eq(&point(1.0, 2.0, 3.0), &point(1.0, 2.0, 3.0 + 1e-9)));
        assert!(tuple_eq(&vector(1.0, 2.0, 3.0), &vector(1.0, 2.0 - 5e-5, 3.0)));
        assert!(!tuple_eq(&point(1.0, 2.0, 3.0), &point(1.0, 2.0, 3.001)));
        assert!(!tuple_eq(&point(1.0, 2.0, 3.0), &vector(1.0, 2.0, 3.0)));

        assert!(color_eq(&Color::new(0.9, 0.6, 0.75), &Color::new(0.9, 0.6, 0.75 + 1e-6)));
        assert!(!color_eq(&Color::new(0.9, 0.6, 0.75), &Color::new(0.9, 0.61, 0.75)));
    }

    #[test]
    fn subtracting_two_points_gives_a_vector() {
        let v = point(3.0, 2.0, 1.0) - point(5.0, 6.0, 7.0);
        assert_abs_diff_eq!(v, vector(-2.0, -4.0, -6.0));
    }

    #[test]
    fn magnitude_and_normalisation() {
        let v = vector(1.0, 2.0, 3.0);
        assert_relative_eq!(v.magnitude(), 14f64.sqrt());
        let n = v.normalize();
        assert_abs_diff_eq!(n, vector(0.26726, 0.53452, 0.80178), epsilon = 1e-5);
        assert_relative_eq!(n.magnitude(), 1.0);
    }

    #[test]
    fn cross_product_of_two_vectors() {
        let a = vector(1.0, 2.0, 3.0);
        let b = vector(2.0, 3.0, 4.0);
        assert_abs_diff_eq!(cross(&a, &b), vector(-1.0, 2.0, -1.0));
        assert_abs_diff_eq!(cross(&b, &a), vector(1.0, -2.0, 1.0));
    }

    #[test]
    fn reflecting_a_vector_approaching_at_45_degrees() {
        let v = vector(1.0, -1.0, 0.0);
        let n = vector(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(reflect(&v, &n), vector(1.0, 1.0, 0.0));
    }

    #[test]
    fn reflecting_a_vector_off_a_slanted_surface() {
        let v = vector(0.0, -1.0, 0.0);
        let h = 2f64.sqrt() / 2.0;
        let n = vector(h, h, 0.0);
        assert_abs_diff_eq!(reflect(&v, &n), vector(1.0, 0.0, 0.0), epsilon = 1e-10);
    }

    #[test]
    fn pixels_are_clamped_and_rounded() {
        assert_eq!(get_pixel(&Color::new(1.5, 0.0, -0.5)), Rgb([255, 0, 0]));
        assert_eq!(get_pixel(&Color::new(0.5, 0.0, 1.0)), Rgb([128, 0, 255]));
    }
}
