//! Translation, scaling, rotation and shearing as 4x4 matrices
//!
//! Builders compose by multiplication, rightmost applied first:
//! `translation(..) * scaling(..)` scales, then translates.

use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::utils::cross;
use crate::Tuple;

pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
    let mut m = Matrix::identity(4);
    m[(0, 3)] = x;
    m[(1, 3)] = y;
    m[(2, 3)] = z;
    m
}

pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
    let mut m = Matrix::identity(4);
    m[(0, 0)] = x;
    m[(1, 1)] = y;
    m[(2, 2)] = z;
    m
}

/// Rotation about the x axis, `radians` measured left-handed
pub fn rotation_x(radians: f64) -> Matrix {
    let (sin, cos) = radians.sin_cos();
    Matrix::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos, -sin, 0.0],
        [0.0, sin, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_y(radians: f64) -> Matrix {
    let (sin, cos) = radians.sin_cos();
    Matrix::from_rows([
        [cos, 0.0, sin, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin, 0.0, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_z(radians: f64) -> Matrix {
    let (sin, cos) = radians.sin_cos();
    Matrix::from_rows([
        [cos, -sin, 0.0, 0.0],
        [sin, cos, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Shear each component in proportion to the other two, e.g. `xy` moves x in proportion to y
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
    Matrix::from_rows([
        [1.0, xy, xz, 0.0],
        [yx, 1.0, yz, 0.0],
        [zx, zy, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Orient the world relative to an eye at `from` looking at `to`
pub fn view_transform(from: &Tuple, to: &Tuple, up: &Tuple) -> Matrix {
    let forward = (to - from).normalize();
    let left = cross(&forward, &up.normalize());
    let true_up = cross(&left, &forward);
    let orientation = Matrix::from_rows([
        [left[0], left[1], left[2], 0.0],
        [true_up[0], true_up[1], true_up[2], 0.0],
        [-forward[0], -forward[1], -forward[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    orientation * translation(-from[0], -from[1], -from[2])
}

/// One step of a transform chain in a scene file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformConfig {
    Translate { x: f64, y: f64, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    RotateX { radians: f64 },
    RotateY { radians: f64 },
    RotateZ { radians: f64 },
    Shear {
        xy: f64,
        xz: f64,
        yx: f64,
        yz: f64,
        zx: f64,
        zy: f64,
    },
}
impl TransformConfig {
    pub fn to_matrix(&self) -> Matrix {
        match *self {
            Self::Translate { x, y, z } => translation(x, y, z),
            Self::Scale { x, y, z } => scaling(x, y, z),
            Self::RotateX { radians } => rotation_x(radians),
            Self::RotateY { radians } => rotation_y(radians),
            Self::RotateZ { radians } => rotation_z(radians),
            Self::Shear {
                xy,
                xz,
                yx,
                yz,
                zx,
                zy,
            } => shearing(xy, xz, yx, yz, zx, zy),
        }
    }

    /// Compose a chain so that the first entry is applied first
    pub fn compose(chain: &[TransformConfig]) -> Matrix {
        chain
            .iter()
            .fold(Matrix::identity(4), |acc, step| step.to_matrix() * acc)
    }
}
