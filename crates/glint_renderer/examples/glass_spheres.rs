//! Example: Nested glass spheres under a spot light.
//!
//! Renders a transparent sphere with an opaque core floating above a
//! mirror floor, then saves the result as a PNG.
//!
//! Run with: cargo run --release --example glass_spheres

use glint_core::{Attenuation, Camera, Light, Material, Scene, Shape, Surface};
use glint_renderer::{RenderConfig, Vec3};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Glint - Glass Spheres Example");
    println!("=============================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default()
        .with_samples(9)
        .with_shadow_rays(16)
        .with_progress(true);

    println!(
        "Rendering 500x500 @ {} samples, {} shadow rays...",
        config.samples, config.shadow_rays
    );

    let start = std::time::Instant::now();
    let image = config.render(&scene, 500, 500, 150.0, 150.0)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "glass_spheres.png";
    image.save_png(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, -1000.0),
        Vec3::Z,
        Vec3::new(0.0, -1.0, 0.0),
    )?;
    let mut scene = Scene::new(camera, 1000.0);

    // Outer glass shell with an opaque red core.
    scene.add_shape(Shape::new(
        Surface::sphere(Vec3::new(0.0, 0.0, 50.0), 50.0),
        Vec3::new(0.0, 0.0, 1.0),
        Material::with_transmission(0.4, 0.3, 100, 0.3, 0.0),
    ));
    scene.add_shape(Shape::new(
        Surface::sphere(Vec3::new(0.0, 0.0, 50.0), 25.0),
        Vec3::new(1.0, 0.0, 0.0),
        Material::new(0.5, 0.5, 100),
    ));

    // Mirror floor below the spheres. The camera's up vector points at
    // -y, so larger y is lower on screen; keep the floor past the light.
    scene.add_shape(Shape::new(
        Surface::plane(Vec3::new(0.0, 150.0, 0.0), Vec3::new(0.0, -1.0, 0.0))?,
        Vec3::ZERO,
        Material::with_transmission(0.2, 0.2, 30, 0.0, 0.4),
    ));

    // A broad spot light with a physical radius for soft shadows.
    scene.add_light(
        Light::spot(
            Vec3::new(1000.0, 600.0, 0.0) / 255.0,
            Vec3::new(-100.0, 100.0, -500.0),
            Vec3::new(-1.0, 1.0, 2.0),
            Attenuation::new(1.0, 0.0004, 0.0000006),
        )?
        .with_radius(15.0),
    );

    scene.build_hierarchy();
    Ok(scene)
}
