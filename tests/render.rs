use approx::assert_abs_diff_eq;
use whitted::prelude::*;
use whitted::scene::SceneError;

const TWO_SPHERES: &str = "
camera:
  width: 11
  height: 11
  field_of_view: 1.5707963267948966
  from: [0, 0, -5]
  to: [0, 0, 0]
  up: [0, 1, 0]
light:
  position: [-10, 10, -10]
  intensity: [1, 1, 1]
objects:
  - shape: sphere
    material:
      color: [0.8, 1.0, 0.6]
      diffuse: 0.7
      specular: 0.2
  - shape: sphere
    transforms:
      - { type: scale, x: 0.5, y: 0.5, z: 0.5 }
";

#[test]
fn rendering_a_scene_file_matches_the_hand_built_world() {
    let scene = Scene::from_yaml(TWO_SPHERES).unwrap();
    let image = scene.render();
    assert_eq!((image.width(), image.height()), (11, 11));
    assert_abs_diff_eq!(
        image.pixel_at(5, 5),
        Color::new(0.38066, 0.47583, 0.2855),
        epsilon = EPSILON
    );
    // Corners look past both spheres
    assert_eq!(image.pixel_at(0, 0), Color::zeros());
    assert_eq!(image.pixel_at(10, 10), Color::zeros());
}

#[test]
fn demo_scene_loads_and_renders() {
    let scene = Scene::from_yaml(include_str!("../scenes/glass_and_mirrors.yaml")).unwrap();
    assert_eq!(scene.arena.len(), 6);
    assert_eq!(scene.max_depth, 5);

    let camera = scene.camera.resized(16, 8);
    let image = camera.render(&scene.world(), scene.max_depth);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let c = image.pixel_at(x, y);
            assert!(c.iter().all(|v| v.is_finite() && *v >= 0.0), "pixel ({x}, {y}) is {c:?}");
        }
    }

    let ppm = image.to_ppm();
    assert!(ppm.starts_with("P3\n16 8\n255\n"));
    assert!(ppm.lines().all(|l| l.len() <= 70));
}

#[test]
fn depth_zero_disables_reflection() {
    let yaml = format!(
        "{TWO_SPHERES}  - shape: plane
    transforms:
      - {{ type: translate, x: 0, y: -1, z: 0 }}
    material: {{ reflective: 1.0, color: [0, 0, 0], ambient: 0, diffuse: 0, specular: 0 }}
"
    );
    let mut scene = Scene::from_yaml(&yaml).unwrap();
    scene.camera = scene.camera.resized(21, 21);
    let camera = &scene.camera;
    let world = scene.world();

    // This pixel sees the black mirror floor, which reflects the outer sphere
    let direct = camera.render(&world, 0).pixel_at(10, 14);
    assert_eq!(direct, Color::zeros());
    let reflected = camera.render(&world, 1).pixel_at(10, 14);
    assert!(reflected.iter().any(|&v| v > 0.0));
}

#[test]
fn hand_built_scene_with_glass() {
    let mut arena = ObjectArena::default();
    let floor = arena.add(Plane);
    floor.set_transform(translation(0.0, -1.0, 0.0)).unwrap();
    floor.material = Material {
        reflective: 0.5,
        transparency: 0.5,
        refractive_index: 1.5,
        ..Default::default()
    };
    let ball = arena.add(Sphere);
    ball.set_transform(translation(0.0, -3.5, -0.5)).unwrap();
    ball.material.color = Color::new(1.0, 0.0, 0.0);
    ball.material.ambient = 0.5;

    let light = Light::new(point(-10.0, 10.0, -10.0), Color::new(1.0, 1.0, 1.0));
    let world = World::from_arena(&arena, light);
    let h = 2f64.sqrt() / 2.0;
    let ray = Ray::new(point(0.0, 0.0, -3.0), vector(0.0, -h, h));
    let c = world.color_at(&ray, DEFAULT_DEPTH);
    // Red from the ball seen through the floor dominates
    assert!(c[0] > c[1] && c[0] > c[2]);
}

#[test]
fn loading_a_missing_scene_fails() {
    assert!(matches!(
        Scene::load("scenes/no_such_scene.yaml"),
        Err(SceneError::Io { .. })
    ));
}
