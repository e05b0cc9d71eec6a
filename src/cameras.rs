//! Cameras and configs for cameras
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::matrix::{Matrix, MatrixError};
use crate::transforms::view_transform;
use crate::utils::{point, SerdeVector};
use crate::world::World;
use crate::Ray;

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal or vertical field of view in radians, whichever spans the longer image side
    pub field_of_view: f64,
    pub from: SerdeVector,
    pub to: SerdeVector,
    pub up: SerdeVector,
}

/// Pinhole camera one unit in front of a canvas of `hsize` x `vsize` pixels
#[derive(Debug, Clone)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    transform: Matrix,
    inverse: Matrix,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}
impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Self {
        // Establish the viewport
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };
        let pixel_size = half_width * 2.0 / hsize as f64;

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Matrix::identity(4),
            inverse: Matrix::identity(4),
            half_width,
            half_height,
            pixel_size,
        }
    }

    pub fn from_config(config: CameraConfig) -> Result<Self, MatrixError> {
        let mut camera = Self::new(config.width, config.height, config.field_of_view);
        camera.set_transform(view_transform(
            &config.from.to_point(),
            &config.to.to_point(),
            &config.up.to_vector(),
        ))?;
        Ok(camera)
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// World-space width of one pixel on the canvas
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Orient the camera; usually a [`view_transform`]
    pub fn set_transform(&mut self, transform: Matrix) -> Result<(), MatrixError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;
        Ok(())
    }

    /// Same orientation and field of view over a canvas of a different size
    pub fn resized(&self, hsize: usize, vsize: usize) -> Self {
        Self {
            transform: self.transform,
            inverse: self.inverse,
            ..Self::new(hsize, vsize, self.field_of_view)
        }
    }

    /// Ray from the camera through the centre of pixel (`px`, `py`)
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * point(world_x, world_y, -1.0);
        let origin = self.inverse * point(0.0, 0.0, 0.0);
        Ray::new(origin, (pixel - origin).normalize())
    }

    /// Render every pixel of `world`, allowing `remaining` bounces per camera ray
    pub fn render(&self, world: &World<'_>, remaining: u32) -> Canvas {
        self.render_with(world, remaining, |_| {})
    }

    /// Render like [`Camera::render`], calling `on_pixel` with the number of pixels done so far
    pub fn render_with(
        &self,
        world: &World<'_>,
        remaining: u32,
        mut on_pixel: impl FnMut(usize),
    ) -> Canvas {
        info!(
            width = self.hsize,
            height = self.vsize,
            objects = world.objects().len(),
            remaining,
            "render start"
        );
        let start = Instant::now();

        let mut image = Canvas::new(self.hsize, self.vsize);
        let mut done = 0;
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y);
                image.write_pixel(x, y, world.color_at(&ray, remaining));
                done += 1;
                on_pixel(done);
            }
        }

        let elapsed = start.elapsed();
        info!(?elapsed, "render finished");
        debug!(
            pixels = done,
            per_pixel = ?elapsed.checked_div(done.max(1) as u32),
            "render timing"
        );
        image
    }
}
