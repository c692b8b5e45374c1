use std::path::PathBuf;

use clap::Parser;
use sdl2::image::InitFlag;

use fantasy_falls_menu::config::{AssetPaths, GAME_TITLE};
use fantasy_falls_menu::gui::{MenuContext, MenuHost, Platform, StateId};
use fantasy_falls_menu::platform::SdlPlatform;
use fantasy_falls_menu::platform::sdl::create_canvas;
use fantasy_falls_menu::save::SettingsStore;

#[derive(Parser)]
#[command(name = "fantasy_falls")]
#[command(about = "Fantasy Falls menu front-end", long_about = None)]
struct Cli {
    /// Settings file (default: platform config directory)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Asset directory holding sounds, music and images
    #[arg(short, long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// Start windowed even if fullscreen was saved
    #[arg(long)]
    windowed: bool,

    /// Screen to open first (main, settings, test, pause)
    #[arg(long, default_value = "main")]
    start: StateId,
}

fn main() -> Result<(), String> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::open_default(),
    };
    if cli.windowed {
        settings.set_fullscreen(false);
    }

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(InitFlag::PNG | InitFlag::JPG)?;

    let canvas = create_canvas(&video_subsystem, GAME_TITLE, settings.fullscreen())?;
    let texture_creator = canvas.texture_creator();
    let event_pump = sdl_context.event_pump()?;
    let mut platform = SdlPlatform::new(canvas, event_pump, &texture_creator);

    let screen_size = platform.screen_size();
    let ctx = MenuContext::new(settings, AssetPaths::new(cli.assets), screen_size);
    let mut host = MenuHost::new(ctx);
    if let Some(background) = host.background_icon().map(str::to_string) {
        platform.preload_icon(&background);
    }

    tracing::info!("Starting {} at {}", GAME_TITLE, cli.start);
    host.run_from(cli.start, &mut platform)?;
    Ok(())
}
