use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;

use solar_portfolio::config::SceneConfig;
use solar_portfolio::math::orbit::{orbital_period, radius_and_phase};
use solar_portfolio::model::BodyKind;

#[derive(Debug, Parser)]
struct Args {
    name: String,
    /// Scene file to look the body up in, instead of the built-in one
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };
    let orrery = config.build_orrery()?;

    let body = orrery
        .find_body(&args.name)
        .ok_or_else(|| anyhow!("no body named '{}'", args.name))?;
    let info = &body.info;
    let (radius, phase) = radius_and_phase(&info.base_position);

    println!("Characteristics of {} ({})", info.display_name, info.key);
    println!("- Description: {}", info.description);
    match info.section {
        Some(section) => println!("- Section: {}", section.title()),
        None => println!("- Section: none"),
    }
    match info.kind {
        BodyKind::Star => println!("- Kind: star"),
        BodyKind::Planet => println!("- Kind: planet"),
        BodyKind::Moon { parent } => {
            let parent_name = orrery
                .get_body(parent)
                .map_or("<missing>", |p| p.info.display_name.as_str());
            println!("- Kind: moon of {}", parent_name);
        }
    }
    println!("- Size: {}", info.scale);
    println!("- Orbital radius: {}", radius);
    println!("- Starting angle: {:.1} deg", phase.to_degrees());
    println!("- Orbital speed: {} rad/s", info.orbital_speed);
    println!("- Orbital period: {:?} s", orbital_period(info.orbital_speed));
    println!("- Orbital inclination: {:.2} deg", info.orbital_inclination.to_degrees());
    println!("- Spin rate: {} rad/s", info.spin_rate);
    println!("- Axial tilt: {:.1} deg", info.axial_tilt.to_degrees());

    let moons: Vec<_> = orrery
        .bodies()
        .filter(|b| b.parent() == Some(body.id))
        .map(|b| b.info.display_name.as_str())
        .collect();
    if !moons.is_empty() {
        println!("- Moons: {}", moons.join(", "));
    }
    if orrery.rings().iter().any(|r| r.parent == body.id) {
        println!("- Has rings");
    }
    Ok(())
}
