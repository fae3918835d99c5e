use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};

use cellgen::{CellRequest, GenConfig, ItemCatalog, MapGenerator, TileGrid};

#[derive(Parser, Debug)]
#[command(name = "cellgen")]
#[command(about = "Generate the tile map of one world cell from its type and neighborhood")]
struct Args {
    /// Cell type id to generate (e.g. "house_north", "lab", "sewer_nes")
    #[arg(short, long, default_value = "field")]
    cell: String,

    /// Cell type id to the north
    #[arg(long, default_value = "null")]
    north: String,

    /// Cell type id to the east
    #[arg(long, default_value = "null")]
    east: String,

    /// Cell type id to the south
    #[arg(long, default_value = "null")]
    south: String,

    /// Cell type id to the west
    #[arg(long, default_value = "null")]
    west: String,

    /// Cell type id directly above ("null" for ground level)
    #[arg(long, default_value = "null")]
    above: String,

    /// World seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cell position on the world map
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x: i64,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y: i64,

    /// Depth; negative is underground
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    z: i32,

    /// Print the generated grid as JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// List every cell type id that has a generator and exit
    #[arg(long)]
    list: bool,

    /// Generate N cells along a row in parallel and print a summary of each
    #[arg(long)]
    batch: Option<usize>,

    /// Generation tuning overrides (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of item group overrides (*.json)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Writes log records to stderr.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        eprintln!("[{}] {}: {}", tag, record.target(), record.args());
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

fn build_generator(args: &Args) -> cellgen::Result<MapGenerator> {
    let config = match &args.config {
        Some(path) => GenConfig::from_json_file(path)?,
        None => GenConfig::default(),
    };
    config.validate()?;
    let catalog = match &args.items {
        Some(dir) => ItemCatalog::load_from(dir)?,
        None => ItemCatalog::defaults()?,
    };
    Ok(MapGenerator::new(catalog, config))
}

fn print_summary(grid: &TileGrid) {
    println!("Items: {}", grid.total_items());
    for spawn in grid.spawns() {
        println!("Spawn: {} x{} at ({}, {})", spawn.monster, spawn.count, spawn.pos.x, spawn.pos.y);
    }
    for computer in grid.computers() {
        println!(
            "Terminal: \"{}\" (security {}) at ({}, {}), {} options",
            computer.name,
            computer.security,
            computer.pos.x,
            computer.pos.y,
            computer.options.len()
        );
    }
    for vehicle in grid.vehicles() {
        println!("Vehicle: {} at ({}, {}) facing {}", vehicle.vehicle, vehicle.pos.x, vehicle.pos.y, vehicle.facing);
    }
}

fn run(args: Args) -> cellgen::Result<()> {
    let generator = build_generator(&args)?;

    if args.list {
        for cell in generator.registry().cell_types() {
            println!("{}", cell);
        }
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let request = CellRequest {
        cell: args.cell.clone(),
        north: args.north.clone(),
        east: args.east.clone(),
        south: args.south.clone(),
        west: args.west.clone(),
        above: args.above.clone(),
        world_seed: seed,
        x: args.x,
        y: args.y,
        z: args.z,
        ..CellRequest::default()
    };

    if let Some(count) = args.batch {
        println!("Generating {} x {} cells with seed: {}", count, request.cell, seed);
        let requests: Vec<CellRequest> = (0..count as i64)
            .map(|i| CellRequest {
                x: args.x + i,
                ..request.clone()
            })
            .collect();
        for (i, grid) in generator.generate_batch(&requests).into_iter().enumerate() {
            println!(
                "Cell ({}, {}): {} items, {} spawns, {} terminals",
                requests[i].x,
                requests[i].y,
                grid.total_items(),
                grid.spawns().len(),
                grid.computers().len()
            );
        }
        return Ok(());
    }

    let grid = generator.generate(&request);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        println!("Generated {} with seed: {}", request.cell, seed);
        print!("{}", grid.to_ascii());
        print_summary(&grid);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
