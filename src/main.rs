use crate::algos::{Builder, Refinement, SwapOptimizer};
use crate::balance::Balance;
use crate::config::Config;
use crate::loaders::Loader;
use crate::model::{Assignments, TutorialGroup};
use clap::Parser;
use eyre::{Result, ensure};
use rand::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

mod algos;
mod balance;
mod checks;
mod config;
mod display;
mod loaders;
mod model;
mod reports;
mod stats;

/// Assign students to balanced teams inside their tutorial groups
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Student records CSV
    students: PathBuf,
    /// Write the assignment report to FILE
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "balanced_teams.csv"
    )]
    output: PathBuf,
    /// Use FILE instead of teamform.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Do not write the report file
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Fix the random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
    /// Override the configured team size
    #[arg(long, value_name = "N")]
    team_size: Option<usize>,
    /// Override the configured refinement round budget
    #[arg(long, value_name = "N")]
    max_rounds: Option<usize>,
    /// Render text bar charts for every tutorial group
    #[arg(long)]
    charts: bool,
    /// Increase verbosity (repeat for more)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose);
    let config = match &args.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(Path::new("teamform.toml"), false)?,
    };
    let team_size = args.team_size.unwrap_or(config.solver.team_size);
    ensure!(team_size > 0, "team size must be at least 1");
    let max_rounds = args.max_rounds.unwrap_or(config.solver.max_rounds);
    let mut rng = match args.seed.or(config.solver.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let students = Loader::new(&config.input.columns)?.load(&args.students)?;
    ensure!(
        !students.is_empty(),
        "no students found in {}",
        args.students.display()
    );
    let groups = TutorialGroup::partition(students);
    info!(groups = groups.len(), team_size, "Forming teams");

    let mut outcomes = Vec::new();
    let mut total = Refinement { rounds: 0, swaps: 0 };
    for group in groups {
        let balance = Balance::new(group.average_cgpa(), config.balance.cgpa_tolerance);
        let mut assignments = Assignments::new(group, team_size);
        info!(
            group = %assignments.group,
            students = assignments.students.len(),
            target = balance.target_cgpa(),
            "Building teams"
        );
        Builder::new(&mut assignments, balance, &mut rng).assign();
        let refinement = SwapOptimizer::new(&mut assignments, balance, max_rounds).refine();
        total.rounds += refinement.rounds;
        total.swaps += refinement.swaps;
        checks::check_dropped_students(&assignments);
        checks::check_forced_placements(&assignments);
        checks::ensure_consistent(&assignments)?;
        outcomes.push(assignments);
    }

    let rows = reports::rows(&outcomes, config.output.numbering);
    checks::ensure_reported_means(&outcomes, &rows)?;
    checks::ensure_distinct_students(&rows)?;
    if !args.dry_run {
        reports::save(&args.output, &rows)?;
    }
    for assignments in &outcomes {
        display::display_details(assignments);
        if args.charts {
            display::display_charts(assignments);
        }
    }
    display::display_stats(&outcomes, total);
    Ok(())
}
