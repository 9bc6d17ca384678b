//! Hard-coded scenes and the cameras that frame them.

use std::sync::Arc;

use lumen_renderer::{
    gen_f32, CameraBuilder, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
    Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::SceneKind;

/// A world plus the camera settings it was composed for.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraBuilder,
}

pub fn build(kind: SceneKind, seed: u64) -> Scene {
    match kind {
        SceneKind::Random => random_scene(seed),
        SceneKind::Ground => ground_scene(),
        SceneKind::Materials => materials_scene(),
    }
}

fn sphere(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, material))
}

/// Ground, a field of small spheres on a 22x22 grid, and three large spheres.
pub fn random_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    world.add(sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    ));

    // All small glass spheres share one material
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );
            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() < 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                    gen_f32(&mut rng) * gen_f32(&mut rng),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + gen_f32(&mut rng)),
                    0.5 * (1.0 + gen_f32(&mut rng)),
                    0.5 * (1.0 + gen_f32(&mut rng)),
                );
                let fuzz = 0.5 * (1.0 + gen_f32(&mut rng));
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(sphere(center, 0.2, material));
        }
    }

    world.add(sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(sphere(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    log::debug!("Random scene has {} spheres", world.len());

    Scene {
        world,
        camera: CameraBuilder::new()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.1, 10.0),
    }
}

/// A single diffuse sphere on a ground sphere of radius 100.
pub fn ground_scene() -> Scene {
    let mut world = HittableList::new();
    world.add(sphere(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.8, 0.3, 0.3))),
    ));
    world.add(sphere(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    ));

    Scene {
        world,
        camera: CameraBuilder::new(),
    }
}

/// Diffuse, fuzzy metal, and a hollow glass bubble (outer shell plus an
/// inner sphere of negative radius).
pub fn materials_scene() -> Scene {
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let mut world = HittableList::new();

    world.add(sphere(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    ));
    world.add(sphere(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    ));
    world.add(sphere(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
    ));
    world.add(sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.add(sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass));

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);

    Scene {
        world,
        camera: CameraBuilder::new()
            .with_position(look_from, look_at, Vec3::Y)
            .with_lens(20.0, 2.0, (look_from - look_at).length()),
    }
}
