#![warn(clippy::all, clippy::cargo)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use nalgebra::Vector2;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phong_shader::renderer::{self, try_shade_faces, Settings};
use phong_shader::scene::{load_model, Scene};

#[derive(Parser, Debug)]
struct Args {
    /// Folder holding scene.yaml
    scene_folder: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a lit sphere to a PNG file
    Sphere {
        #[arg(short, long, default_value = "sphere.png")]
        output: PathBuf,
        #[arg(long, default_value_t = 500)]
        width: u32,
        #[arg(long, default_value_t = 500)]
        height: u32,
        /// Defaults to 40% of the smaller image side
        #[arg(long)]
        radius: Option<f64>,
        /// Name of the reflection constants in scene.yaml
        #[arg(short, long)]
        constants: Option<String>,
    },
    /// Print the flat color of every triangle of an OBJ model
    Faces {
        model: PathBuf,
        #[arg(short, long)]
        constants: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let scene = Scene::load_from_folder(&args.scene_folder)
        .with_context(|| format!("Unable to load scene from {}", args.scene_folder.display()))?;

    match args.command {
        Command::Sphere {
            output,
            width,
            height,
            radius,
            constants,
        } => {
            let material = scene.material(constants.as_deref())?;
            let settings = Settings {
                thread_count: scene.threads,
                image_size: Vector2::new(width, height),
                radius: radius.unwrap_or(0.4 * width.min(height) as f64),
            };

            let film = renderer::render_sphere(&scene, &material, settings)?;
            film.save(&output)
                .with_context(|| format!("Unable to write {}", output.display()))?;
            info!(output = %output.display(), "Image saved");
        }
        Command::Faces { model, constants } => {
            let material = scene.material(constants.as_deref())?;
            let polygons = load_model(&model)
                .with_context(|| format!("Unable to load model {}", model.display()))?;

            let colors = try_shade_faces(&polygons, &scene, &material);

            let bar = ProgressBar::new(colors.len() as u64);
            for (face, color) in colors.iter().enumerate() {
                match color {
                    Ok(color) => {
                        let [r, g, b] = color.to_rgb8();
                        println!("{} {} {} {}", face, r, g, b);
                    }
                    Err(e) => warn!(face, %e, "Skipping degenerate triangle"),
                }
                bar.inc(1);
            }
            bar.finish_and_clear();
        }
    }

    Ok(())
}
