mod config;
mod simulate;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use breath_core::{BreathConfig, Presence, evaluate, expansion, radius, tick};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "breathe", about = "Breath synchronization and presence placement engine")]
struct Cli {
    /// Config file (TOML). Falls back to $BREATHE_CONFIG, then defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the breath phase at a moment in time
    Phase {
        /// Unix seconds (default: now)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<f64>,
    },

    /// Compute one frame of placements and constellation edges
    Frame {
        /// Synthetic roster size (ignored with --roster)
        #[arg(long, default_value_t = 0)]
        population: usize,

        /// JSON file with a roster: [{"stableIndex": 0, "id": "..."}]
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Unix seconds (default: now)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<f64>,

        /// Print the full frame as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a config file
    Validate {
        /// File to check (default: the resolved config)
        path: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Run a seeded join/leave churn simulation
    Simulate {
        #[arg(long, default_value_t = 600)]
        frames: usize,

        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Starting population
        #[arg(long, default_value_t = 100)]
        population: usize,

        /// Per-frame join and leave probability
        #[arg(long, default_value_t = 0.05)]
        churn: f64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Unix seconds of the first frame
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Current wall-clock time as fractional Unix seconds.
fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Phase { at } => cmd_phase(&cli, *at),
        Commands::Frame {
            population,
            roster,
            at,
            json,
        } => cmd_frame(&cli, *population, roster.as_deref(), *at, *json),
        Commands::Validate { path } => cmd_validate(&cli, path.as_deref()),
        Commands::Config => cmd_config(&cli),
        Commands::Simulate {
            frames,
            fps,
            population,
            churn,
            seed,
            start,
        } => cmd_simulate(
            &cli,
            simulate::SimulationOptions {
                frames: *frames,
                fps: *fps,
                start_time: *start,
                population: *population,
                churn: *churn,
            },
            *seed,
        ),
    }
}

fn load_config(cli: &Cli) -> Result<BreathConfig> {
    let (config, _) = config::load(cli.config.as_deref()).context("failed to load config")?;
    Ok(config)
}

fn cmd_phase(cli: &Cli, at: Option<f64>) -> Result<()> {
    let config = load_config(cli)?;
    let t = at.unwrap_or_else(now_secs);
    let phase = evaluate(t, &config.phase);

    println!("phase:      {} ({})", phase.kind.label(), phase.index());
    println!("progress:   {:.3}", phase.progress);
    println!("cycle:      {:.3}", phase.cycle_progress);
    println!("remaining:  {:.1}s", phase.remaining(&config.phase));
    println!("radius:     {:.3}", radius(&phase, &config.placement));
    println!("expansion:  {:.3}", expansion(&phase, &config.placement));
    Ok(())
}

fn read_roster(path: &Path) -> Result<Vec<Presence>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid roster in {}", path.display()))
}

fn synthetic_roster(population: usize) -> Vec<Presence> {
    (0..population as u64)
        .map(|i| Presence::new(i, Uuid::new_v4().to_string()))
        .collect()
}

fn cmd_frame(
    cli: &Cli,
    population: usize,
    roster: Option<&Path>,
    at: Option<f64>,
    json: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let roster = match roster {
        Some(path) => read_roster(path)?,
        None => synthetic_roster(population),
    };
    let t = at.unwrap_or_else(now_secs);
    let frame = tick(t, &roster, &config, None);

    if json {
        let out = serde_json::to_string_pretty(&frame).context("failed to serialize frame")?;
        println!("{out}");
        return Ok(());
    }

    println!("population: {}", frame.population());
    println!(
        "phase:      {} ({:.3})",
        frame.phase.kind.label(),
        frame.phase.progress
    );
    println!("radius:     {:.3}", frame.radius);
    println!("speed:      {:.3}", frame.orbital_speed);
    println!(
        "scale:      {:.3}{}",
        frame.density.scale,
        if frame.density.crowded { " (crowded)" } else { "" }
    );
    println!("edges:      {}", frame.edges.len());
    Ok(())
}

fn cmd_validate(cli: &Cli, path: Option<&Path>) -> Result<()> {
    let (config, source) = match path {
        Some(path) => (
            config::read_file(path)?,
            config::ConfigSource::Flag(path.to_path_buf()),
        ),
        None => config::load(cli.config.as_deref())?,
    };

    println!("ok: {source}");
    println!("cycle:      {:.2}s", config.phase.total_cycle());
    println!(
        "shell:      {:.3}..{:.3} (floor {:.3})",
        config.placement.min_radius(),
        config.placement.max_radius(),
        config.placement.min_orbit_radius()
    );
    println!("neighbors:  {}", config.placement.neighbor_count());
    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    print!("{}", config::to_toml(&config)?);
    Ok(())
}

fn cmd_simulate(cli: &Cli, opts: simulate::SimulationOptions, seed: u64) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&opts.churn),
        "churn must be between 0 and 1, got {}",
        opts.churn
    );
    ensure!(
        opts.fps.is_finite() && opts.fps > 0.0,
        "fps must be positive, got {}",
        opts.fps
    );

    let config = load_config(cli)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let report = simulate::run(&config, &opts, &mut rng);

    println!("frames:      {}", report.frames);
    println!(
        "population:  {} (peak {}, +{} -{})",
        report.final_population, report.peak_population, report.joins, report.leaves
    );
    if report.max_scale > 0.0 {
        println!("scale:       {:.3}..{:.3}", report.min_scale, report.max_scale);
    }
    match report.min_edge {
        Some(d) => println!("min edge:    {d:.3}"),
        None => println!("min edge:    -"),
    }
    println!(
        "frame time:  mean {}us, max {}us",
        report.mean_frame.as_micros(),
        report.max_frame.as_micros()
    );
    Ok(())
}
