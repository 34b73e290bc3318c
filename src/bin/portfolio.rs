use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kiss3d::window::Window;

use solar_portfolio::app::PortfolioApp;
use solar_portfolio::config::SceneConfig;
use solar_portfolio::gui::{DisplayOptions, Simulation};
use solar_portfolio::scene::SceneComposer;
use solar_portfolio::theme::{self, ThemeKind};

/// A portfolio you fly around: every planet is a section.
#[derive(Debug, Parser)]
struct Args {
    /// Scene file (json5) overriding the built-in solar system and content
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for textures and background layouts; random if not given
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the saved theme for this run
    #[arg(long)]
    theme: Option<ThemeKind>,
    /// Where the theme choice is remembered
    #[arg(long, default_value = ".portfolio-theme")]
    theme_file: PathBuf,
    /// Width of body textures in pixels
    #[arg(long)]
    texture_size: Option<u32>,
    /// Fewer dust particles
    #[arg(long)]
    low_detail: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    log::info!("Scene seed is {}", seed);

    let theme = args
        .theme
        .unwrap_or_else(|| theme::load_preference(&args.theme_file));
    let low_detail = args.low_detail || config.low_detail();
    let texture_size = args.texture_size.unwrap_or_else(|| config.texture_size());

    let orrery = config.build_orrery().context("building the scene")?;
    log::info!("Scene has {} bodies", orrery.num_bodies());
    let scene = SceneComposer::new(orrery, seed, theme.palette(), low_detail);
    let app = PortfolioApp::new(scene, config.content());

    let mut window = Window::new("Solar Portfolio");
    window.set_framerate_limit(Some(60));

    let options = DisplayOptions {
        theme,
        theme_file: args.theme_file,
        texture_seed: seed,
        texture_size,
    };
    let simulation = Simulation::new(app, options, &mut window);
    window.render_loop(simulation);
    Ok(())
}
