//! Route a floor-plan image from the command line.
//!
//! Loads a legend-colored raster, inserts the two requested endpoints and
//! writes the annotated route image next to a plain-text (or JSON) dump of
//! the pixel path.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use floorgraph::{load_map, ColorLegend};
use floorgraph_core::Rgb;

#[derive(Parser, Debug)]
#[command(name = "floorgraph")]
#[command(about = "Compute a route between two points of a floor-plan image")]
struct Cli {
    /// Floor-plan image (white free space, black walls).
    map: PathBuf,

    /// Start point as "X,Y" in pixel coordinates.
    #[arg(long, value_parser = parse_point)]
    start: (i32, i32),

    /// End point as "X,Y" in pixel coordinates.
    #[arg(long, value_parser = parse_point)]
    end: (i32, i32),

    /// Where to write the annotated route image.
    #[arg(long, default_value = "route.png")]
    out: PathBuf,

    /// Door legend color as "R,G,B".
    #[arg(long, value_parser = parse_color, default_value = "0,255,0")]
    door_color: Rgb,

    /// Obstacle legend color as "R,G,B".
    #[arg(long, value_parser = parse_color, default_value = "255,0,0")]
    obstacle_color: Rgb,

    /// Print the pixel path as a JSON array instead of one pair per line.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected \"X,Y\", got {s:?}"));
    }
    let x = parts[0].trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = parts[1].trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected \"R,G,B\", got {s:?}"));
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|e| format!("bad channel: {e}"))?;
    }
    Ok(rgb)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    floorgraph_core::init_with_level(level)?;

    let legend = ColorLegend {
        door: cli.door_color,
        obstacle: cli.obstacle_color,
        ..ColorLegend::default()
    };

    let mut map = load_map(&cli.map, &legend)?;
    map.insert_point(cli.start.0, cli.start.1)?;
    map.insert_point(cli.end.0, cli.end.1)?;

    let (path, annotated) = map.compute_path()?;
    annotated.save(&cli.out)?;

    if cli.json {
        println!("{}", serde_json::to_string(&path)?);
    } else {
        for (x, y) in &path {
            println!("{x},{y}");
        }
    }
    log::info!("route of {} pixel(s) written to {}", path.len(), cli.out.display());

    Ok(())
}
