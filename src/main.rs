//! Fireworks demo: a rocket fountain whose particles burst into sparks
//! and a soft flash of light.

use std::f32::consts::PI;

use sparkly::prelude::*;

fn fireworks_config() -> Result<EmitterConfig, sparkly::ConfigError> {
    let sparks = EmitterConfig::new(Gradient::new(vec![
        ColorStop::new(1.0, Rgba::new(255, 255, 255, 255)),
        ColorStop::new(1.0, Rgba::new(255, 180, 0, 125)),
        ColorStop::new(0.0, Rgba::new(255, 0, 0, 0)),
    ])?)
    .lifetime(1.0)
    .frequency(40.0)
    .angle_range(0.0, 2.0 * PI)
    .size(4.0)
    .speed(180.0)
    .kind(EmitKind::Burst)
    .amount(EmitAmount::Single)
    .burst_interval(0.49);

    let flash = EmitterConfig::new(Gradient::new(vec![
        ColorStop::new(1.0, Rgba::new(125, 125, 125, 255)),
        ColorStop::new(0.0, Rgba::new(125, 125, 125, 0)),
    ])?)
    .lifetime(1.0)
    .frequency(1.5)
    .angle_range(0.0, 0.0)
    .size(2000.0)
    .speed(0.0)
    .kind(EmitKind::Burst)
    .amount(EmitAmount::Single)
    .burst_interval(0.90);

    let rocket = EmitterConfig::new(Gradient::new(vec![
        ColorStop::new(1.0, Rgba::new(255, 255, 255, 255)),
        ColorStop::new(1.0, Rgba::new(255, 255, 225, 255)),
        ColorStop::new(0.0, Rgba::new(255, 255, 225, 0)),
    ])?)
    .lifetime(1.0)
    .frequency(1.0)
    .angle_range(-PI / 2.0, PI / 2.0)
    .size(6.0)
    .speed(280.0)
    .gravity(0.581)
    .sub_emission(flash)
    .sub_emission(sparks);

    Ok(rocket)
}

fn main() {
    let config = match fireworks_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid emitter config: {err}");
            std::process::exit(1);
        }
    };

    println!("{config}");

    let system = match ParticleSystem::new(config) {
        Ok(system) => system.with_origin(Vec2::new(300.0, 300.0)),
        Err(err) => {
            eprintln!("invalid emitter config: {err}");
            std::process::exit(1);
        }
    };

    let sprite = SpriteImage::from_path("sprites/circle.png")
        .unwrap_or_else(|_| SpriteImage::soft_circle(16));

    if let Err(err) = sparkly::window::run(system, sprite) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
