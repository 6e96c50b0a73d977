use std::path::PathBuf;

use clap::{Parser, Subcommand};
use natal_base::{NodeMode, deg_to_dms, to_zodiac};
use natal_config::NatalConfig;
use natal_core::{AnalyticEphemeris, Body, EphemerisProvider};
use natal_frames::SphericalCoords;
use natal_geo::{GeoPoint, GeoProjector, MapDims};
use natal_orbit::{MinorBodyFrame, MinorBodyPropagator};
use natal_rs::{CelestialPositionSet, ChartAssembler, PlanetLines};
use natal_search::{LunarNodeLocator, NodeEvent, next_node_crossing, prev_node_crossing};
use natal_time::UtcTime;

#[derive(Parser)]
#[command(name = "natal", about = "Natal chart and map projection CLI")]
struct Cli {
    /// JSON configuration file (default: $NATAL_CONFIG, else built-in)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zodiac sign from tropical longitude
    Zodiac {
        /// Tropical ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
    /// Full natal chart for a birth instant and place
    Chart {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Lunar nodes at an instant, with the surrounding ecliptic crossings
    Nodes {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        /// Node mode: mean or crossing (overrides the configuration)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Minor body longitude from its orbital elements
    Minor {
        /// Minor body name from the configuration
        #[arg(default_value = "chiron")]
        name: String,
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        /// Report the heliocentric J2000 longitude
        #[arg(long)]
        heliocentric: bool,
    },
    /// Project latitude/longitude to map pixels
    Project {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Map width in pixels
        #[arg(long, default_value = "1000")]
        width: f64,
        /// Map height in pixels
        #[arg(long, default_value = "507.209")]
        height: f64,
    },
    /// Invert a map pixel back to latitude/longitude
    Unproject {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, default_value = "1000")]
        width: f64,
        #[arg(long, default_value = "507.209")]
        height: f64,
    },
    /// Astrocartography lines for an instant
    Lines {
        /// UTC datetime (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: String,
        /// Only this body (e.g. venus)
        #[arg(long)]
        body: Option<String>,
    },
}

fn exit_with(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn parse_utc(s: &str) -> UtcTime {
    s.parse()
        .unwrap_or_else(|e| exit_with(format!("invalid date {s:?}: {e}")))
}

fn load_config(path: Option<&PathBuf>) -> NatalConfig {
    let loaded = match path {
        Some(p) => NatalConfig::load(p),
        None => NatalConfig::from_env(),
    };
    let config = loaded.unwrap_or_else(|e| exit_with(e));
    log::debug!(
        "{} minor bodies, {} correction rules, node mode {}",
        config.minor_bodies.len(),
        config.corrections.rules.len(),
        config.node_mode.name()
    );
    config
}

fn require_geo(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap_or_else(|e| exit_with(e))
}

fn require_dims(width: f64, height: f64) -> MapDims {
    MapDims::new(width, height).unwrap_or_else(|e| exit_with(e))
}

fn parse_node_mode(s: &str) -> NodeMode {
    match s.to_ascii_lowercase().as_str() {
        "mean" => NodeMode::Mean,
        "crossing" | "true" => NodeMode::Crossing,
        _ => exit_with(format!("invalid node mode {s:?}: expected mean or crossing")),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => exit_with(e),
    }
}

fn print_chart(chart: &CelestialPositionSet) {
    println!(
        "Chart for {} at {:.4}, {:.4}",
        chart.instant,
        chart.location.lat(),
        chart.location.lng()
    );
    println!("  JD(UT) {:.6}  JD(TT) {:.6}", chart.jd_ut, chart.jd_tt);
    println!(
        "  {} chart, nodes: {}",
        if chart.is_day_chart { "Day" } else { "Night" },
        chart.nodes.mode.name()
    );
    for e in &chart.entries {
        let flag = if e.retrograde { "R" } else { " " };
        let low = if chart.is_low_confidence(&e.name) {
            "  (low confidence)"
        } else {
            ""
        };
        println!(
            "  {:<16} {:>9.4}°  {} {flag}{low}",
            e.name,
            e.ecliptic_longitude,
            e.zodiac()
        );
    }
}

fn print_node_event(label: &str, ev: &NodeEvent) {
    println!(
        "{label}: {} ({}), Moon lon {:.4}°, North Node {:.4}°",
        UtcTime::from_jd_tt(ev.jd_tt),
        ev.kind.name(),
        ev.moon_longitude_deg,
        ev.north_longitude_deg()
    );
}

fn print_lines(lines: &PlanetLines) {
    println!("{}", lines.name);
    for line in lines.lines() {
        let segments = line.segments();
        println!(
            "  {:<2} {:>4} points in {} segment(s)",
            line.kind.name(),
            line.points.len(),
            segments.len()
        );
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .try_init()
        .ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Zodiac { lon } => {
            let z = to_zodiac(lon);
            if cli.json {
                print_json(&z);
            } else {
                println!("{z} ({:.4}°)", z.longitude());
                println!("  Element: {:?}  Modality: {:?}", z.sign.element(), z.sign.modality());
            }
        }

        Commands::Dms { deg } => {
            let d = deg_to_dms(deg);
            let sign = if deg < 0.0 { "-" } else { "" };
            println!("{sign}{} deg {} min {:.2} sec", d.degrees, d.minutes, d.seconds);
        }

        Commands::Chart { date, lat, lng } => {
            let at = parse_utc(&date);
            let place = require_geo(lat, lng);
            let config = load_config(cli.config.as_ref());
            let assembler = ChartAssembler::new(&config).unwrap_or_else(|e| exit_with(e));
            let chart = assembler
                .compute_chart(&at, &place)
                .unwrap_or_else(|e| exit_with(e));
            if cli.json {
                print_json(&chart);
            } else {
                print_chart(&chart);
            }
        }

        Commands::Nodes { date, mode } => {
            let at = parse_utc(&date);
            let config = load_config(cli.config.as_ref());
            let mode = mode.map_or(config.node_mode, |m| parse_node_mode(&m));
            let eph = AnalyticEphemeris::with_kepler_config(config.kepler)
                .unwrap_or_else(|e| exit_with(e));
            let locator = LunarNodeLocator::new(&eph, config.node_search, mode)
                .unwrap_or_else(|e| exit_with(e));
            let reading = locator.nodes_near(&at).unwrap_or_else(|e| exit_with(e));

            if cli.json {
                print_json(&reading);
                return;
            }
            println!("Nodes at {at} ({} mode)", mode.name());
            println!(
                "  North Node: {:.4}°  {}",
                reading.pair.north(),
                to_zodiac(reading.pair.north())
            );
            println!(
                "  South Node: {:.4}°  {}",
                reading.pair.south(),
                to_zodiac(reading.pair.south())
            );
            let jd_tt = at.to_jd_tt();
            match prev_node_crossing(&eph, jd_tt, &config.node_search) {
                Ok(Some(ev)) => print_node_event("Previous crossing", &ev),
                Ok(None) => println!("No previous crossing in search window"),
                Err(e) => exit_with(e),
            }
            match next_node_crossing(&eph, jd_tt, &config.node_search) {
                Ok(Some(ev)) => print_node_event("Next crossing", &ev),
                Ok(None) => println!("No next crossing in search window"),
                Err(e) => exit_with(e),
            }
        }

        Commands::Minor {
            name,
            date,
            heliocentric,
        } => {
            let at = parse_utc(&date);
            let config = load_config(cli.config.as_ref());
            let body = config.minor_body(&name).unwrap_or_else(|| {
                exit_with(format!("no minor body named {name:?} in configuration"))
            });
            let prop = MinorBodyPropagator::new(config.kepler).unwrap_or_else(|e| exit_with(e));
            let jd_tt = at.to_jd_tt();
            let frame = if heliocentric {
                MinorBodyFrame::Heliocentric
            } else {
                config.minor_body_frame
            };

            let helio = prop
                .propagate(&body.elements, jd_tt)
                .unwrap_or_else(|e| exit_with(e));
            let (lon, lat, dist) = match frame {
                MinorBodyFrame::Heliocentric => {
                    (helio.longitude_deg, helio.latitude_deg, helio.radius_au)
                }
                MinorBodyFrame::Geocentric => {
                    let eph = AnalyticEphemeris::with_kepler_config(config.kepler)
                        .unwrap_or_else(|e| exit_with(e));
                    let sun = eph
                        .ecliptic_position(Body::Sun, jd_tt)
                        .unwrap_or_else(|e| exit_with(e));
                    let sun = SphericalCoords {
                        lon_deg: sun.lon_deg,
                        lat_deg: sun.lat_deg,
                        distance: sun.distance_au,
                    };
                    let g = prop
                        .geocentric(&body.elements, jd_tt, &sun)
                        .unwrap_or_else(|e| exit_with(e));
                    (g.lon_deg, g.lat_deg, g.distance_au)
                }
            };
            let z = to_zodiac(lon);
            let k = helio.kepler;

            if cli.json {
                print_json(&serde_json::json!({
                    "name": body.name,
                    "instant": at.to_string(),
                    "frame": frame,
                    "longitude_deg": lon,
                    "latitude_deg": lat,
                    "distance_au": dist,
                    "zodiac": z,
                    "kepler": {
                        "eccentric_anomaly_rad": k.eccentric_anomaly_rad,
                        "iterations": k.iterations,
                        "converged": k.converged,
                    },
                }));
                return;
            }
            println!("{} at {at} ({frame:?})", body.name);
            println!("  Longitude: {lon:.4}°  {z}");
            println!("  Latitude:  {lat:.4}°  Distance: {dist:.4} AU");
            println!(
                "  Kepler: E = {:.8} rad after {} iteration(s){}",
                k.eccentric_anomaly_rad,
                k.iterations,
                if k.converged { "" } else { " (not converged)" }
            );
        }

        Commands::Project {
            lat,
            lng,
            width,
            height,
        } => {
            let place = require_geo(lat, lng);
            let dims = require_dims(width, height);
            let config = load_config(cli.config.as_ref());
            let projector = GeoProjector::new(config.corrections).unwrap_or_else(|e| exit_with(e));
            let p = projector.project(&place, dims);
            if cli.json {
                print_json(&p);
            } else {
                println!("x = {:.3}, y = {:.3}", p.x, p.y);
                println!(
                    "  Zone: {}  Rule: {}",
                    p.zone.name(),
                    p.rule.as_deref().unwrap_or("none")
                );
            }
        }

        Commands::Unproject {
            x,
            y,
            width,
            height,
        } => {
            let dims = require_dims(width, height);
            let config = load_config(cli.config.as_ref());
            let projector = GeoProjector::new(config.corrections).unwrap_or_else(|e| exit_with(e));
            let g = projector
                .unproject(x, y, dims)
                .unwrap_or_else(|e| exit_with(e));
            if cli.json {
                print_json(&g);
            } else {
                println!("lat = {:.5}, lng = {:.5}", g.lat(), g.lng());
            }
        }

        Commands::Lines { date, body } => {
            let at = parse_utc(&date);
            let config = load_config(cli.config.as_ref());
            let assembler = ChartAssembler::new(&config).unwrap_or_else(|e| exit_with(e));
            let mut all = assembler
                .astrocartography(&at)
                .unwrap_or_else(|e| exit_with(e));
            if let Some(name) = body {
                all.retain(|l| l.name.eq_ignore_ascii_case(&name));
                if all.is_empty() {
                    exit_with(format!("unknown body {name:?}"));
                }
            }
            if cli.json {
                print_json(&all);
            } else {
                println!("Astrocartography lines for {at}");
                for lines in &all {
                    print_lines(lines);
                }
            }
        }
    }
}
