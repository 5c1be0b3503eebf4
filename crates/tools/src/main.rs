use std::env;
use std::fs;
use std::path::PathBuf;

use formats::{CountryFeature, Dataset, normalize_name};
use foundation::Millis;
use globe::{
    DataSources, FLY_DURATION_MS, GlobeSession, HeadlessSurface, RenderSurface, SessionConfig,
    feature_centroid,
};
use layers::{color_for, ramp_position};
use serde::Serialize;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "summary" => cmd_summary(args),
        "country" => cmd_country(args),
        "ramp" => cmd_ramp(args),
        "fly" => cmd_fly(args),
        _ => Err(usage()),
    }
}

fn load_dataset(csv_path: &PathBuf, geojson_path: &PathBuf) -> Result<Dataset, String> {
    let table = fs::read_to_string(csv_path).map_err(|e| format!("read {csv_path:?}: {e}"))?;
    let geojson =
        fs::read_to_string(geojson_path).map_err(|e| format!("read {geojson_path:?}: {e}"))?;
    Dataset::ingest_geojson(&table, &geojson).map_err(|e| format!("ingest: {e}"))
}

#[derive(Debug, Serialize)]
struct SummaryReport {
    latest_year: i32,
    feature_count: usize,
    max_deaths: f64,
    top: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    iso_a2: String,
    name: String,
    deaths: f64,
}

fn cmd_summary(args: Vec<String>) -> Result<(), String> {
    // terra summary <stats.csv> <countries.geojson> [--top N] [--json]
    if args.len() < 2 {
        return Err(usage());
    }

    let csv_path = PathBuf::from(&args[0]);
    let geojson_path = PathBuf::from(&args[1]);

    let mut top: usize = 10;
    let mut as_json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--top" => {
                i += 1;
                if i >= args.len() {
                    return Err("--top requires a value".to_string());
                }
                top = args[i]
                    .parse::<usize>()
                    .map_err(|_| "--top must be an integer".to_string())?;
            }
            "--json" => {
                as_json = true;
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let dataset = load_dataset(&csv_path, &geojson_path)?;

    let mut ranked: Vec<&CountryFeature> = dataset.features.iter().collect();
    ranked.sort_by(|a, b| b.derived_stat.total_cmp(&a.derived_stat));
    ranked.truncate(top);

    if as_json {
        let report = SummaryReport {
            latest_year: dataset.latest_year,
            feature_count: dataset.features.len(),
            max_deaths: dataset.max_stat,
            top: ranked
                .iter()
                .map(|f| SummaryRow {
                    iso_a2: f.iso_a2.clone(),
                    name: f.name.clone(),
                    deaths: f.derived_stat,
                })
                .collect(),
        };
        let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
        return Ok(());
    }

    println!("latest year: {}", dataset.latest_year);
    println!(
        "features: {} (max deaths {})",
        dataset.features.len(),
        dataset.max_stat
    );
    for f in &ranked {
        println!("  {:<4} {:<32} {}", f.iso_a2, f.name, f.derived_stat);
    }
    Ok(())
}

fn cmd_country(args: Vec<String>) -> Result<(), String> {
    // terra country <stats.csv> <countries.geojson> <iso-or-name>
    if args.len() != 3 {
        return Err(usage());
    }

    let csv_path = PathBuf::from(&args[0]);
    let geojson_path = PathBuf::from(&args[1]);
    let query = &args[2];

    let dataset = load_dataset(&csv_path, &geojson_path)?;
    let normalized = normalize_name(query);
    let feature = dataset
        .features
        .iter()
        .find(|f| f.iso_a2.eq_ignore_ascii_case(query) || normalize_name(&f.name) == normalized)
        .ok_or_else(|| format!("no country matches {query:?}"))?;

    let center = feature_centroid(feature).map_err(|e| format!("centroid: {e}"))?;
    let fill = color_for(feature.derived_stat, dataset.max_stat);

    println!("{} ({})", feature.name, feature.iso_a2);
    println!("  deaths ({}): {}", dataset.latest_year, feature.derived_stat);
    println!("  centroid: lat {:.4}, lon {:.4}", center.lat_deg, center.lon_deg);
    println!("  fill: {}", fill.to_css());
    Ok(())
}

fn cmd_ramp(args: Vec<String>) -> Result<(), String> {
    // terra ramp <stats.csv> <countries.geojson> [--steps N]
    if args.len() < 2 {
        return Err(usage());
    }

    let csv_path = PathBuf::from(&args[0]);
    let geojson_path = PathBuf::from(&args[1]);

    let mut steps: usize = 8;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("--steps requires a value".to_string());
                }
                steps = args[i]
                    .parse::<usize>()
                    .map_err(|_| "--steps must be an integer".to_string())?;
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }
    if steps == 0 {
        return Err("--steps must be at least 1".to_string());
    }

    let dataset = load_dataset(&csv_path, &geojson_path)?;

    println!("max deaths: {}", dataset.max_stat);
    for step in 0..=steps {
        let value = dataset.max_stat * (step as f64) / (steps as f64);
        let t = ramp_position(value, dataset.max_stat);
        let color = color_for(value, dataset.max_stat);
        println!("  {value:>12.1}  t={t:.3}  {}", color.to_css());
    }
    Ok(())
}

fn cmd_fly(args: Vec<String>) -> Result<(), String> {
    // terra fly <stats.csv> <countries.geojson> <ISO> [--config FILE]
    if args.len() < 3 {
        return Err(usage());
    }

    let csv_path = PathBuf::from(&args[0]);
    let geojson_path = PathBuf::from(&args[1]);
    let iso = args[2].clone();

    let mut config_path: Option<PathBuf> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a path".to_string());
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| format!("read {path:?}: {e}"))?;
            SessionConfig::from_json(&text).map_err(|e| format!("parse config: {e}"))?
        }
        None => SessionConfig {
            spawn_entities: true,
            ..SessionConfig::default()
        },
    };

    let table = fs::read_to_string(&csv_path).map_err(|e| format!("read {csv_path:?}: {e}"))?;
    let geojson =
        fs::read_to_string(&geojson_path).map_err(|e| format!("read {geojson_path:?}: {e}"))?;

    let mut session = GlobeSession::initialize(
        HeadlessSurface::new(),
        config,
        Some(DataSources {
            stat_table: &table,
            features_geojson: &geojson,
        }),
        None,
    )
    .map_err(|e| format!("initialize: {e}"))?;

    let known = session.dataset().map_or(false, |d| d.contains(&iso));
    if !known {
        return Err(format!("no ingested feature with ISO code {iso:?}"));
    }

    session.handle_click(&iso).map_err(|e| format!("click: {e}"))?;

    let mut now = 0.0;
    while now <= FLY_DURATION_MS {
        session.tick(Millis(now)).map_err(|e| format!("tick: {e}"))?;
        let pose = session.surface().viewpoint();
        println!(
            "t={now:>6.0}ms  lat={:>8.3}  lon={:>8.3}  alt={:.3}",
            pose.lat_deg, pose.lon_deg, pose.altitude
        );
        now += 250.0;
    }

    eprintln!(
        "focus: {:?}, markers: {}, surface calls: {}",
        session.focus(),
        session.surface().markers().map_or(0, |m| m.len()),
        session.surface().calls().len()
    );
    Ok(())
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "terra".to_string());
    format!(
        "Usage:\n  {exe} summary <stats.csv> <countries.geojson> [--top N] [--json]\n  {exe} country <stats.csv> <countries.geojson> <iso-or-name>\n  {exe} ramp <stats.csv> <countries.geojson> [--steps N]\n  {exe} fly <stats.csv> <countries.geojson> <ISO> [--config FILE]\n\nNotes:\n- The CSV needs an Entity,Year,... header; the latest year wins per country.\n- GeoJSON features are matched to CSV rows by lowercased, trimmed name.\n- `fly` drives a headless session and prints the camera pose every 250 ms.\n"
    )
}
