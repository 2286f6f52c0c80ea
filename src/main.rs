use stackplan::cli::commands::{ClassifyArgs, CliArgs, Commands, PlanArgs};
use stackplan::cli::output::{append_to_file, OutputFormatter};
use stackplan::config::{parse_patterns, PlannerConfig, RawOptions};
use stackplan::fs::RealFileSystem;
use stackplan::planner::{classify, PatternSet, StackPath};
use stackplan::service::PlanningService;
use stackplan::util::logging::{init_logging, LoggingConfig};
use stackplan::VERSION;

use clap::Parser;
use std::path::Path;
use tracing::{debug, error, info, warn};

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("stackplan v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Plan(plan_args) => handle_plan(plan_args),
        Commands::Classify(classify_args) => handle_classify(classify_args),
    };

    std::process::exit(exit_code);
}

fn handle_plan(args: &PlanArgs) -> i32 {
    if !args.root.is_dir() {
        warn!("Root path is not a directory: {}", args.root.display());
    }

    let raw = RawOptions::from_env().overlay(args.raw_options());
    let config = PlannerConfig::from_raw(&raw).with_root(args.root.clone());
    debug!("{}", config);

    let service = PlanningService::new(RealFileSystem::new());
    let report = match service.run(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Planning failed: {}", e);
            eprintln!("\nCheck the PATTERNS environment variable or the --patterns flag.");
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    let output = match formatter.format_report(&report) {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return 1;
        }
    };

    emit(&output, config.output_file.as_deref())
}

fn handle_classify(args: &ClassifyArgs) -> i32 {
    let stacks: Vec<StackPath> = args
        .stacks
        .iter()
        .filter_map(|raw| {
            let stack = StackPath::new(raw);
            if stack.is_none() {
                warn!("Ignoring empty stack path '{}'", raw);
            }
            stack
        })
        .collect();

    let patterns = match PatternSet::new(parse_patterns(args.patterns.as_deref())) {
        Ok(patterns) => patterns,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let result = classify(&stacks, &patterns);
    info!(
        sequential = result.sequential.len(),
        parallel = result.parallel.len(),
        "Classified stacks"
    );

    match OutputFormatter::new(args.format.into()).format_classification(&result) {
        Ok(output) => emit(&output, None),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

fn emit(output: &str, destination: Option<&Path>) -> i32 {
    match destination {
        Some(path) => match append_to_file(path, output) {
            Ok(()) => {
                info!("Output written to {}", path.display());
                0
            }
            Err(e) => {
                error!("{:#}", e);
                1
            }
        },
        None => {
            print!("{}", output);
            if !output.is_empty() && !output.ends_with('\n') {
                println!();
            }
            0
        }
    }
}
