use crate::config::RawOptions;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deployment-order planner for infrastructure-as-code stacks
#[derive(Parser, Debug)]
#[command(
    name = "stackplan",
    about = "Deployment-order planner for infrastructure-as-code stacks",
    version,
    author,
    long_about = "stackplan decides which stack directories changed, splits them by \
                  environment, and orders them into a sequential stage (matched by \
                  priority patterns, first match wins) and a parallel stage (everything else)."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Enable debug logging"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Build a per-environment deployment plan",
        long_about = "Derives candidate stacks from changed files or glob filters, keeps the \
                      valid ones, and prints the plan for every configured environment.\n\n\
                      Options not given on the command line are read from the PATTERNS, \
                      ENVIRONMENTS, CHANGED_FILES, GLOB_FILTER, STACK_VALIDATOR, OUTPUT_MODE \
                      and GITHUB_OUTPUT environment variables.\n\n\
                      Examples:\n  \
                      stackplan plan --changed-files '[\"stacks/dev/iam/main.tf\"]'\n  \
                      stackplan plan --glob-filter 'stacks/dev/*' --output-mode groups\n  \
                      stackplan plan --stack-validator has-tf --format json"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Classify stack paths into sequential and parallel groups",
        long_about = "Classifies the given stack paths with the priority patterns, without \
                      filesystem checks or environment splitting.\n\n\
                      Examples:\n  \
                      stackplan classify dev/networking dev/iam dev/app\n  \
                      stackplan classify --patterns $'**/dns\\n**/iam' prod/iam prod/dns"
    )]
    Classify(ClassifyArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Directory stack paths are relative to"
    )]
    pub root: PathBuf,

    #[arg(
        long,
        value_name = "GLOBS",
        help = "Newline-separated priority patterns, most foundational first"
    )]
    pub patterns: Option<String>,

    #[arg(
        long,
        value_name = "JSON",
        help = "JSON object mapping environment name to path prefix"
    )]
    pub environments: Option<String>,

    #[arg(long, value_name = "JSON", help = "JSON array of changed file paths")]
    pub changed_files: Option<String>,

    #[arg(
        long,
        value_name = "GLOBS",
        help = "Comma-separated globs selecting stack directories (overrides --changed-files)"
    )]
    pub glob_filter: Option<String>,

    #[arg(
        long,
        value_name = "MODE",
        help = "Stack validation: none, has-tf, backend-s3 [default: backend-s3]"
    )]
    pub stack_validator: Option<String>,

    #[arg(
        long,
        value_name = "MODE",
        help = "Per-environment output shape: stages, groups [default: stages]"
    )]
    pub output_mode: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "github",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Append output to file instead of stdout (defaults to $GITHUB_OUTPUT when set)"
    )]
    pub output: Option<PathBuf>,
}

impl PlanArgs {
    /// Options given on the command line, to be laid over the environment
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            patterns: self.patterns.clone(),
            environments: self.environments.clone(),
            changed_files: self.changed_files.clone(),
            glob_filter: self.glob_filter.clone(),
            stack_validator: self.stack_validator.clone(),
            output_mode: self.output_mode.clone(),
            output_file: self.output.as_ref().map(|p| p.display().to_string()),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(value_name = "STACK", help = "Stack paths, in the order they should be considered")]
    pub stacks: Vec<String>,

    #[arg(
        long,
        value_name = "GLOBS",
        help = "Newline-separated priority patterns, most foundational first"
    )]
    pub patterns: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "github",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Github,
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Github => super::output::OutputFormat::Github,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_plan_args() {
        let args = CliArgs::parse_from(["stackplan", "plan"]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.root, PathBuf::from("."));
                assert_eq!(plan_args.format, OutputFormatArg::Github);
                assert!(plan_args.patterns.is_none());
                assert!(plan_args.output.is_none());
                assert_eq!(plan_args.raw_options(), RawOptions::default());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_plan_with_options() {
        let args = CliArgs::parse_from([
            "stackplan",
            "plan",
            "--root",
            "/tmp/repo",
            "--environments",
            r#"{"dev":"stacks/dev"}"#,
            "--glob-filter",
            "stacks/dev/*",
            "--stack-validator",
            "has-tf",
            "--output-mode",
            "groups",
            "--format",
            "json",
            "--output",
            "/tmp/out",
        ]);

        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.root, PathBuf::from("/tmp/repo"));
                assert_eq!(plan_args.format, OutputFormatArg::Json);
                let raw = plan_args.raw_options();
                assert_eq!(raw.environments.as_deref(), Some(r#"{"dev":"stacks/dev"}"#));
                assert_eq!(raw.glob_filter.as_deref(), Some("stacks/dev/*"));
                assert_eq!(raw.stack_validator.as_deref(), Some("has-tf"));
                assert_eq!(raw.output_mode.as_deref(), Some("groups"));
                assert_eq!(raw.output_file.as_deref(), Some("/tmp/out"));
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_classify_command() {
        let args = CliArgs::parse_from(["stackplan", "classify", "dev/iam", "dev/app"]);
        match args.command {
            Commands::Classify(classify_args) => {
                assert_eq!(classify_args.stacks, vec!["dev/iam", "dev/app"]);
                assert!(classify_args.patterns.is_none());
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["stackplan", "-v", "plan"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["stackplan", "--log-level", "debug", "plan"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["stackplan", "-q", "-v", "plan"]).is_err());
    }
}
