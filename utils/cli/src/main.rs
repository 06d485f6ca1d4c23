use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use xmaslights_app::{
    Animation, Collection, Hertz, NoRender, PlaybackConfig, Player, StripRender, UnitsRender,
};
use xmaslights_cli::{load_config, load_coordinates, load_frames, TerminalStrip};

/// Christmas tree lights player
///
/// A command line application for playing CSV animations on a collection of point lights
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = false)]
struct Cli {
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play an animation
    Play {
        /// Light coordinates, one light per row
        #[arg(long, value_name = "FILE")]
        coords: PathBuf,
        /// Animation frames, one frame per row
        #[arg(long, value_name = "FILE")]
        frames: PathBuf,
        /// Frame rate of the animation
        #[arg(short, long, value_name = "Hz")]
        fps: Option<Hertz>,
        /// Start the animation over once its last frame is shown
        #[arg(short, long = "loop")]
        looping: bool,
        /// Factor applied to every channel value
        #[arg(short, long)]
        brightness: Option<f32>,
        /// Playback configuration in JSON format
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Print every frame to the terminal
        #[arg(long)]
        preview: bool,
    },
    /// Show information about the light coordinates
    Info {
        /// Light coordinates, one light per row
        #[arg(long, value_name = "FILE")]
        coords: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

async fn play<R>(
    render: R,
    config: PlaybackConfig,
    coords: Vec<(f64, f64, f64)>,
    frames: Vec<Vec<u8>>,
) -> anyhow::Result<()>
where
    R: UnitsRender + Send + 'static,
{
    let mut collection = Collection::from_config(&config, render);
    collection.populate(coords);
    log::info!(
        "Playing {} frames on {} lights at {} FPS",
        frames.len(),
        collection.len(),
        config.fps
    );

    let mut player = Player::new(collection);
    player
        .play(Animation::new(frames, config.fps), config.looping)
        .await?;

    let handle = player.handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupted, stopping the playback");
            handle.request_stop();
        }
    });
    let summary = player.wait().await;
    interrupt.abort();

    if let Some(summary) = summary? {
        log::info!(
            "Played {} frames in {} passes{}",
            summary.frames_applied,
            summary.passes,
            if summary.stopped { " (stopped)" } else { "" }
        );
    }
    Ok(())
}

fn info(coords: Vec<(f64, f64, f64)>) {
    let mut collection = Collection::new();
    collection.populate(coords);
    if collection.is_empty() {
        log::info!("There are no lights");
        return;
    }

    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for unit in collection.units() {
        let position = unit.position();
        for (i, value) in [position.x, position.y, position.z].into_iter().enumerate() {
            min[i] = min[i].min(value);
            max[i] = max[i].max(value);
        }
    }

    log::info!("Got {} lights", collection.len());
    for (i, axis) in ["x", "y", "z"].into_iter().enumerate() {
        log::info!("{axis}: {:.3} ..= {:.3}", min[i], max[i]);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            coords,
            frames,
            fps,
            looping,
            brightness,
            config,
            preview,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => PlaybackConfig::default(),
            };
            if let Some(fps) = fps {
                config.fps = fps;
            }
            if looping {
                config.looping = true;
            }
            if let Some(brightness) = brightness {
                config.brightness = brightness;
            }

            let coords = load_coordinates(&coords)?;
            let frames = load_frames(&frames, config.brightness)?;
            log::debug!("Loaded {} coordinates and {} frames", coords.len(), frames.len());

            if preview {
                let render = StripRender::new(TerminalStrip::new(std::io::stdout()));
                play(render, config, coords, frames).await?;
            } else {
                play(NoRender, config, coords, frames).await?;
            }
        }
        Command::Info { coords } => {
            info(load_coordinates(&coords)?);
        }

        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}
