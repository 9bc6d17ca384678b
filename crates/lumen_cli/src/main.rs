use anyhow::Result;
use clap::Parser;

mod cli;
mod output;
mod scenes;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen");

    let config = args.render_config()?;
    let scene = scenes::build(args.scene, config.seed);
    log::info!("Built {:?} scene with {} objects", args.scene, scene.world.len());

    let camera = scene
        .camera
        .with_aspect_ratio(config.aspect_ratio())
        .build();

    let rendered = lumen_renderer::render(&camera, &scene.world, &config)?;
    output::save_image(&rendered.image, &args.output)?;

    Ok(())
}
