//! Simple path tracer example.
//!
//! Renders spheres on a ground plane under a sky and saves to PNG.

use luma_renderer::{
    Camera, Color, DiffuseLight, EstimatorConfig, HittableList, Lambertian, RenderConfig,
    RenderSession, Scene, Sphere, Termination, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Luma Path Tracer - Simple Example");
    println!("=================================");

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    // Set up camera
    let mut camera = Camera::new()
        .with_resolution(800, 450)
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_fov(20.0);
    camera.initialize();

    // Render configuration
    let config = RenderConfig {
        samples_per_pixel: 32,
        estimator: EstimatorConfig::PathTracer {
            termination: Termination::RussianRoulette {
                survival_probability: 0.8,
            },
            background_illumination: true,
        },
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width, camera.image_height, config.samples_per_pixel
    );

    let session = RenderSession::new(config)?;
    let start = std::time::Instant::now();
    let image = session.render(&scene, &camera, None)?;
    println!("Rendered in {:?} on {} threads", start.elapsed(), session.threads());

    let filename = "simple_render.png";
    image.save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut world = HittableList::new();

    // Ground
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    // Three main spheres
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        DiffuseLight::with_reflectance(Color::new(4.0, 3.6, 3.0), Color::splat(0.2)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.7, 0.6, 0.5)),
    )));

    Scene::new(world).with_background(Color::new(0.5, 0.7, 1.0))
}
