//! Built-in demo scenes.

use crate::cli::SceneName;
use anyhow::Result;
use luma_math::{Aabb, Vec3};
use luma_renderer::{
    Camera, Color, DiffuseLight, HittableList, HomogeneousMedium, Lambertian, Quad, Scene, Sphere,
};

/// Build the named scene and a camera for a `width` x `height` image.
pub fn build(name: SceneName, width: u32, height: u32) -> Result<(Scene, Camera)> {
    let (scene, camera) = match name {
        SceneName::Cornell => (cornell_box(), cornell_camera()),
        SceneName::Fog => (foggy_cornell_box()?, cornell_camera()),
        SceneName::Furnace => (furnace(), furnace_camera()),
    };

    let mut camera = camera.with_resolution(width, height);
    camera.initialize();
    Ok((scene, camera))
}

const BOX_SIZE: f32 = 555.0;

fn cornell_world() -> HittableList {
    let red = Lambertian::new(Color::new(0.65, 0.05, 0.05));
    let white = Lambertian::new(Color::splat(0.73));
    let green = Lambertian::new(Color::new(0.12, 0.45, 0.15));
    let light = DiffuseLight::new(Color::splat(15.0));

    let s = BOX_SIZE;
    let mut world = HittableList::new();

    // Walls
    world.add(Box::new(Quad::new(Vec3::new(s, 0.0, 0.0), Vec3::new(0.0, s, 0.0), Vec3::new(0.0, 0.0, s), green)));
    world.add(Box::new(Quad::new(Vec3::ZERO, Vec3::new(0.0, s, 0.0), Vec3::new(0.0, 0.0, s), red)));
    world.add(Box::new(Quad::new(Vec3::ZERO, Vec3::new(s, 0.0, 0.0), Vec3::new(0.0, 0.0, s), white)));
    world.add(Box::new(Quad::new(Vec3::new(s, s, s), Vec3::new(-s, 0.0, 0.0), Vec3::new(0.0, 0.0, -s), white)));
    world.add(Box::new(Quad::new(Vec3::new(0.0, 0.0, s), Vec3::new(s, 0.0, 0.0), Vec3::new(0.0, s, 0.0), white)));

    // Ceiling light
    world.add(Box::new(Quad::new(
        Vec3::new(343.0, s - 1.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    )));

    world.add(Box::new(Sphere::new(Vec3::new(185.0, 90.0, 170.0), 90.0, white)));
    world.add(Box::new(Sphere::new(Vec3::new(370.0, 140.0, 380.0), 140.0, white)));

    world
}

fn cornell_box() -> Scene {
    Scene::new(cornell_world())
}

fn foggy_cornell_box() -> Result<Scene> {
    let medium = HomogeneousMedium::new(Color::splat(0.0005), Color::splat(0.002))?
        .with_bounds(Aabb::from_points(Vec3::ZERO, Vec3::splat(BOX_SIZE)));
    Ok(Scene::new(cornell_world()).with_medium(Box::new(medium)))
}

fn cornell_camera() -> Camera {
    Camera::new()
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_fov(40.0)
}

fn furnace() -> Scene {
    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Vec3::ZERO,
        10.0,
        DiffuseLight::with_reflectance(Color::splat(0.5), Color::splat(0.5)),
    )));
    Scene::new(world)
}

fn furnace_camera() -> Camera {
    Camera::new()
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_fov(90.0)
}
