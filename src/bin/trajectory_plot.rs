use std::error::Error;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use nalgebra::{Point3, Rotation3};
use plotters::prelude::*;

use solar_portfolio::config::SceneConfig;
use solar_portfolio::model::comet::Comet;
use solar_portfolio::model::orrery::body_state_at;
use solar_portfolio::model::{BodyKind, Orrery};

/// Plots where the planets and comets go, for eyeballing a scene file.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory the PNGs are written to
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,
    /// Simulated seconds to plot
    #[arg(long, default_value_t = 120.0)]
    duration: f64,
    #[arg(long, default_value_t = 600)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SceneConfig::default(),
    };
    let orrery = config.build_orrery()?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let samples = args.samples.max(2);
    let orbits = args.out_dir.join("orbits.png");
    draw_orbits(&orbits, &orrery, args.duration, samples).map_err(|e| anyhow!("{}", e))?;
    println!("Wrote {}", orbits.display());

    if !orrery.comets().is_empty() {
        let comets = args.out_dir.join("comets.png");
        draw_comet_distances(&comets, &orrery, args.duration, samples)
            .map_err(|e| anyhow!("{}", e))?;
        println!("Wrote {}", comets.display());
    }
    Ok(())
}

fn plot_color(color: &Point3<f32>) -> RGBColor {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(channel(color.x), channel(color.y), channel(color.z))
}

fn sample_times(duration: f64, samples: usize) -> impl Iterator<Item = f64> {
    (0..samples).map(move |i| duration * i as f64 / (samples - 1) as f64)
}

// Top-down view of every planet's path, without the slow group rotation.
fn draw_orbits(
    name: &Path,
    orrery: &Orrery,
    duration: f64,
    samples: usize,
) -> Result<(), Box<dyn Error>> {
    let still = Rotation3::identity();
    let paths: Vec<_> = orrery
        .bodies()
        .filter(|b| b.info.kind == BodyKind::Planet)
        .map(|b| {
            let points: Vec<(f32, f32)> = sample_times(duration, samples)
                .map(|t| {
                    let p = body_state_at(&b.info, t, &still, None, false, false).current_position;
                    (p.x as f32, p.y as f32)
                })
                .collect();
            (b.info.display_name.clone(), plot_color(&b.info.color), points)
        })
        .collect();

    let extent = paths
        .iter()
        .flat_map(|(_, _, points)| points.iter())
        .fold(1.0f32, |acc, (x, y)| acc.max(x.abs()).max(y.abs()))
        * 1.1;

    let root = BitMapBackend::new(name, (800, 800)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Planet orbits", ("sans-serif", 20).into_font().color(&WHITE))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .axis_style(&WHITE)
        .label_style(("sans-serif", 12).into_font().color(&WHITE))
        .light_line_style(&RGBColor(30, 30, 30))
        .draw()?;

    chart.draw_series(std::iter::once(Circle::new((0.0f32, 0.0f32), 6, YELLOW.filled())))?;
    for (name, color, points) in paths {
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 12).into_font().color(&WHITE))
        .border_style(&WHITE)
        .draw()?;
    root.present()?;
    Ok(())
}

// Distance from the sun over time; vaporization shows up as a jump back to
// the spawn distance.
fn draw_comet_distances(
    name: &Path,
    orrery: &Orrery,
    duration: f64,
    samples: usize,
) -> Result<(), Box<dyn Error>> {
    let physics = orrery.comet_physics();
    let dt = duration / (samples - 1) as f64;

    let series: Vec<_> = orrery
        .comets()
        .iter()
        .map(|c| {
            let mut comet = Comet::new(c.config.clone());
            let points: Vec<(f32, f32)> = sample_times(duration, samples)
                .map(|t| {
                    let distance = comet.state().position().coords.norm();
                    comet.update(physics, dt);
                    (t as f32, distance as f32)
                })
                .collect();
            (c.config.name.clone(), plot_color(&c.config.color), points)
        })
        .collect();

    let max_distance = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|(_, d)| *d))
        .fold(physics.vaporization_radius as f32, f32::max)
        * 1.1;

    let root = BitMapBackend::new(name, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Comet distance from the sun", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0f32..duration as f32, 0.0f32..max_distance)?;

    chart.configure_mesh().x_desc("time (s)").y_desc("distance").draw()?;

    let vaporization = physics.vaporization_radius as f32;
    chart.draw_series(LineSeries::new(
        vec![(0.0, vaporization), (duration as f32, vaporization)],
        &RED,
    ))?;
    for (name, color, points) in series {
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;
    root.present()?;
    Ok(())
}
