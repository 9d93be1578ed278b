// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! # Amdahl's Law assistant
//!
//! `amdahl` predicts the overall speedup of optimizing one component of a
//! system, compares components to find the best one to optimize and solves
//! the GPU worked problem. Every subcommand prints a plain-text report; `tui`
//! starts the interactive explorer.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use amdahl_engine::analysis::{Comparator, Comparison};
use amdahl_engine::component::Component;
use amdahl_engine::dataset::predefined_components;
use amdahl_engine::evaluator::{Evaluate, Evaluator};
use amdahl_engine::result::SpeedupResult;
use amdahl_engine::scenario::solve_worked_problem;
use amdahl_engine::sweep::{
    ceiling_curve, component_bars, factor_range, fraction_range, speedup_vs_factor,
    speedup_vs_fraction,
};
use amdahl_terminus::config::Config;
use amdahl_terminus::event::{Event, EventHandler};
use amdahl_terminus::explorer::app::App;
use amdahl_terminus::explorer::handler::handle_key_event;
use amdahl_terminus::report::{
    THEORY, format_comparison, format_efficiency, format_required_factor, format_result,
    format_results_table, format_worked_problem,
};
use amdahl_terminus::session::Session;
use amdahl_terminus::tui::Tui;
use amdahl_terminus::{CliLogger, report_skipped};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::Context;
use log::{LevelFilter, debug, info};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;

/// Milliseconds between explorer ticks
const TICK_RATE_MS: u64 = 100;

/// Command-line arguments.
#[derive(Parser)]
#[command(about = "Predict and compare speedups with Amdahl's Law")]
struct Cli {
    /// Enable debug log messages
    #[arg(short, long)]
    debug: bool,

    /// Extra TOML configuration file
    #[arg(long)]
    conf_file: Option<PathBuf>,

    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: CommandArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SweepKind {
    /// Speedup against the improvement factor
    Factor,
    /// Speedup against the improvable fraction
    Fraction,
    /// Theoretical ceiling against the improvable fraction
    Ceiling,
    /// Speedup of each predefined component
    Components,
}

#[derive(Debug, Subcommand)]
enum CommandArg {
    /// Solve the complete GPU worked problem
    Solve,
    /// List the predefined GPU components
    Components,
    /// Evaluate a single component
    Evaluate {
        #[arg(short, long)]
        name: String,

        /// Share of the work that is improved, as a percentage
        #[arg(short, long)]
        percent: f64,

        /// How many times faster the improved share becomes
        #[arg(short = 'k', long)]
        factor: f64,

        /// Original duration in milliseconds [default: from configuration]
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Rank the components listed in a YAML file
    Compare {
        /// File holding a list of `{name, percent, factor}` entries
        #[arg(short, long)]
        file: PathBuf,

        /// Only compare the last N entries
        #[arg(long)]
        last: Option<usize>,
    },
    /// Find the improvement factor needed for a target speedup
    Target {
        /// Share of the work that is improved, as a percentage
        #[arg(short, long)]
        percent: f64,

        /// Overall speedup to reach [default: from configuration]
        #[arg(short, long)]
        speedup: Option<f64>,
    },
    /// Write plot data as YAML
    Sweep {
        #[arg(long, value_enum)]
        kind: SweepKind,

        /// Output file [default: stdout]
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Explain Amdahl's Law
    Theory,
    /// Start the interactive explorer
    Tui,
}

/// Configure the logger level and formating string.
fn setup_logger(level: LevelFilter) {
    env_logger::builder()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    // Log records would corrupt the explorer's screen
    let level = match (&args.command, args.debug) {
        (CommandArg::Tui, _) => LevelFilter::Off,
        (_, true) => LevelFilter::Debug,
        (_, false) => LevelFilter::Info,
    };
    setup_logger(level);

    let config = Config::load(args.conf_file.as_deref(), &args.config)?;
    debug!("Using {config:?}");
    let comparator = Comparator::new(Evaluator);

    match args.command {
        CommandArg::Solve => {
            let problem = solve_worked_problem(
                &comparator,
                config.original_duration_ms(),
                config.target_speedup(),
            )?;
            println!("{}", format_worked_problem(&problem));
        }
        CommandArg::Components => {
            let analysis = comparator.evaluate_all(&predefined_components());
            report_skipped(&analysis, &mut CliLogger);
            println!("{}", format_results_table(analysis.results()));
        }
        CommandArg::Evaluate {
            name,
            percent,
            factor,
            duration,
        } => evaluate(
            &comparator,
            Component::from_percent(name, percent, factor)?,
            duration.unwrap_or(config.original_duration_ms()),
        )?,
        CommandArg::Compare { file, last } => {
            let session = Session::from_file(&file, &mut CliLogger)?;
            info!(
                "Loaded {} components from {}",
                session.len(),
                file.display()
            );
            let comparison = match last {
                Some(n) => session.compare_last_n(&comparator, n),
                None if session.is_empty() => Comparison::NoData,
                None => Comparison::Ranked(comparator.evaluate_all(session.components())),
            };
            if let Some(analysis) = comparison.analysis() {
                report_skipped(analysis, &mut CliLogger);
            }
            println!("{}", format_comparison(&comparison));
        }
        CommandArg::Target { percent, speedup } => {
            let fraction = percent / 100.0;
            let target = speedup.unwrap_or(config.target_speedup());
            let required = comparator.evaluator().required_factor(fraction, target);
            println!("{}", format_required_factor(fraction, target, &required));
        }
        CommandArg::Sweep { kind, out } => sweep(&comparator, &config, kind, out)?,
        CommandArg::Theory => println!("{THEORY}"),
        CommandArg::Tui => start_explorer(config)?,
    }

    Ok(())
}

fn evaluate(comparator: &Comparator, component: Component, duration: f64) -> Result<()> {
    let component = Arc::new(component);
    let result = SpeedupResult::evaluate_with_timing(comparator.evaluator(), &component, duration)?;
    println!("{}", format_result(&result));
    println!();
    println!("{}", format_efficiency(&result.efficiency_report()));
    println!();
    println!("{}", comparator.limited_impact_explanation(&component)?);
    Ok(())
}

fn sweep(
    comparator: &Comparator,
    config: &Config,
    kind: SweepKind,
    out: Option<PathBuf>,
) -> Result<()> {
    let yaml = match kind {
        SweepKind::Factor => serde_yaml_ng::to_string(&speedup_vs_factor(
            config.factor_sweep_fractions(),
            &factor_range(),
        ))?,
        SweepKind::Fraction => serde_yaml_ng::to_string(&speedup_vs_fraction(
            config.fraction_sweep_factors(),
            &fraction_range(),
        ))?,
        SweepKind::Ceiling => serde_yaml_ng::to_string(&ceiling_curve(&fraction_range()))?,
        SweepKind::Components => serde_yaml_ng::to_string(&component_bars(
            comparator.evaluator(),
            &predefined_components(),
        ))?,
    };

    match out {
        Some(path) => {
            fs::write(&path, yaml)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {kind:?} sweep to {}", path.display());
        }
        None => print!("{yaml}"),
    }
    Ok(())
}

fn start_explorer(config: Config) -> Result<()> {
    let mut app = App::new(config);

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let mut tui = Tui::new(terminal, EventHandler::new(TICK_RATE_MS));
    tui.init()?;

    // Start the main loop.
    while app.is_running() {
        tui.draw(&app)?;
        match tui.events.next()? {
            Event::Tick => app.tick(),
            Event::Key(key_event) => handle_key_event(key_event, &mut app),
            Event::Resize(_, _) => {}
        }
    }

    tui.exit()?;
    Ok(())
}
