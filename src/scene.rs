//! Scene files: YAML description of camera, light and objects
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cameras::{Camera, CameraConfig};
use crate::canvas::Canvas;
use crate::materials::{Light, LightConfig};
use crate::matrix::MatrixError;
use crate::objects::{ObjectArena, ObjectConfig};
use crate::world::World;
use crate::DEFAULT_DEPTH;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("couldn't read scene file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scene description")]
    Yaml(#[from] serde_yaml::Error),
    #[error("bad transform for {what}")]
    Transform {
        what: String,
        #[source]
        source: MatrixError,
    },
}

fn default_max_depth() -> u32 {
    DEFAULT_DEPTH
}

/// Scene Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub light: LightConfig,
    /// Reflection/refraction bounces allowed per camera ray
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

/// Everything needed to render: the objects, the light and the camera
#[derive(Debug, Clone)]
pub struct Scene {
    pub arena: ObjectArena,
    pub light: Light,
    pub camera: Camera,
    pub max_depth: u32,
}
impl Scene {
    pub fn from_config(config: SceneConfig) -> Result<Self, SceneError> {
        let camera = Camera::from_config(config.camera).map_err(|source| {
            warn!(?source, "rejected camera orientation");
            SceneError::Transform {
                what: "camera".to_owned(),
                source,
            }
        })?;

        let mut arena = ObjectArena::default();
        for (i, object) in config.objects.into_iter().enumerate() {
            let shape = object.shape;
            arena.add_from_config(object).map_err(|source| {
                warn!(index = i, ?shape, ?source, "rejected object transform");
                SceneError::Transform {
                    what: format!("object {i} ({shape:?})"),
                    source,
                }
            })?;
        }

        Ok(Self {
            arena,
            light: Light::from_config(config.light),
            camera,
            max_depth: config.max_depth,
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        Self::from_config(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_owned(),
            source,
        })?;
        let scene = Self::from_yaml(&yaml)?;
        debug!(
            path = %path.display(),
            objects = scene.arena.len(),
            max_depth = scene.max_depth,
            "loaded scene"
        );
        Ok(scene)
    }

    /// A world borrowing every object of the scene
    pub fn world(&self) -> World<'_> {
        World::from_arena(&self.arena, self.light)
    }

    /// Render with the scene's own camera and depth
    pub fn render(&self) -> Canvas {
        self.camera.render(&self.world(), self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Sphere;
    use crate::utils::{color_eq, point};
    use crate::Color;

    const MINIMAL: &str = "
camera:
  width: 4
  height: 2
  field_of_view: 1.5707963267948966
  from: [0, 0, -5]
  to: [0, 0, 0]
  up: [0, 1, 0]
light:
  position: [-10, 10, -10]
  intensity: [1, 1, 1]
";

    #[test]
    fn minimal_scene_uses_defaults() {
        let scene = Scene::from_yaml(MINIMAL).unwrap();
        assert_eq!(scene.max_depth, DEFAULT_DEPTH);
        assert!(scene.arena.is_empty());
        assert_eq!(
            scene.light,
            Light::new(point(-10.0, 10.0, -10.0), Color::new(1.0, 1.0, 1.0))
        );
        assert_eq!((scene.camera.hsize(), scene.camera.vsize()), (4, 2));
    }

    #[test]
    fn objects_are_added_in_order() {
        let yaml = format!(
            "{MINIMAL}max_depth: 2
objects:
  - shape: sphere
    material: {{ color: [1, 0, 0] }}
  - shape: plane
    transforms:
      - {{ type: translate, x: 0, y: -1, z: 0 }}
"
        );
        let scene = Scene::from_yaml(&yaml).unwrap();
        assert_eq!(scene.max_depth, 2);
        assert_eq!(scene.arena.len(), 2);
        let first = scene.arena.iter().next().unwrap();
        assert!(color_eq(&first.material.color, &Color::new(1.0, 0.0, 0.0)));
        assert_eq!(scene.world().objects().len(), 2);
    }

    #[test]
    fn singular_object_transform_is_an_error() {
        let yaml = format!(
            "{MINIMAL}objects:
  - shape: cube
    transforms:
      - {{ type: scale, x: 0, y: 1, z: 1 }}
"
        );
        let err = Scene::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, SceneError::Transform { .. }));
    }

    #[test]
    fn degenerate_camera_is_an_error() {
        let yaml = MINIMAL.replace("up: [0, 1, 0]", "up: [0, 0, 1]");
        let err = Scene::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, SceneError::Transform { .. }));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = Scene::from_yaml("camera: [").unwrap_err();
        assert!(matches!(err, SceneError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Scene::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }

    #[test]
    fn scenes_can_be_extended_after_loading() {
        let mut scene = Scene::from_yaml(MINIMAL).unwrap();
        scene.arena.add(Sphere);
        assert_eq!(scene.world().objects().len(), 1);
    }
}
