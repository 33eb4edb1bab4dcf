//! IAM Policy Summary CLI: summarize IAM policy documents from files or stdin.

mod input;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;

use iam_policy_summary::{
    analyze_input, relationship_graph, statement_tree, summary_schema, AnalysisResponse,
    InputFormat, PolicyInput,
};

use crate::input::{read_source, Source, DEFAULT_MAX_BYTES};
use crate::output::{configure_colors, render_json, render_text, render_tree, use_pretty_json};

/// Exit status when at least one policy was rejected.
const EXIT_REJECTED: u8 = 1;
/// Exit status for I/O and usage failures.
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "iam-policy-summary",
    about = "Summarize IAM policy documents: unique actions, resources, principals and per-statement views",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more policy documents
    Analyze {
        /// Policy files to analyze; reads stdin when none are given or for "-"
        files: Vec<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output (default when stdout is a terminal)
        #[arg(long)]
        pretty: bool,
    },
    /// Print the statement/action/resource/principal relationship graph as JSON
    Graph {
        /// Policy file; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Pretty-print JSON output (default when stdout is a terminal)
        #[arg(long)]
        pretty: bool,
    },
    /// Print the policy -> statement -> actions/resources/principal tree
    Tree {
        /// Policy file; reads stdin when omitted or "-"
        file: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output (default when stdout is a terminal)
        #[arg(long)]
        pretty: bool,
    },
    /// Print the JSON schema of the summary output
    Schema,
}

#[derive(Args)]
struct SourceArgs {
    /// How to interpret the input text
    #[arg(
        long,
        value_enum,
        env = "IAM_POLICY_SUMMARY_INPUT_FORMAT",
        default_value_t = InputFormatArg::Auto
    )]
    input_format: InputFormatArg,

    /// Refuse inputs larger than this many bytes
    #[arg(long, env = "IAM_POLICY_SUMMARY_MAX_BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormatArg {
    /// Detect an upload envelope by its `policyJson` member
    Auto,
    /// The input is a policy document
    Raw,
    /// The input is `{"policyJson": "...", "policyName": "..."}`
    Wrapped,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Auto => Self::Auto,
            InputFormatArg::Raw => Self::Raw,
            InputFormatArg::Wrapped => Self::Wrapped,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    configure_colors();

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Analyze {
            files,
            source,
            format,
            pretty,
        } => analyze_files(files, &source, format, pretty).await,
        Commands::Graph {
            file,
            source,
            pretty,
        } => graph_file(file, &source, pretty).await,
        Commands::Tree {
            file,
            source,
            format,
            pretty,
        } => tree_file(file, &source, format, pretty).await,
        Commands::Schema => {
            let schema = summary_schema()?;
            println!("{}", render_json(&schema, true)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read one input and run it through analysis.
async fn respond(source: &Source, args: &SourceArgs) -> Result<AnalysisResponse> {
    let text = read_source(source, args.max_bytes).await?;
    let result = PolicyInput::from_text(&text, args.input_format.into())
        .and_then(|input| analyze_input(&input));
    Ok(AnalysisResponse::from(result))
}

async fn analyze_files(
    files: Vec<PathBuf>,
    args: &SourceArgs,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode> {
    let sources = Source::from_args(files);
    let labelled = sources.len() > 1;
    let pretty = use_pretty_json(pretty);
    let mut rejected = 0usize;

    for source in &sources {
        debug!("Analyzing {}", source);

        match respond(source, args).await? {
            AnalysisResponse::Summary(summary) => {
                if labelled && format == OutputFormat::Text {
                    println!("==> {} <==", source);
                }
                let rendered = match format {
                    OutputFormat::Json => render_json(&summary, pretty)?,
                    OutputFormat::Text => render_text(&summary),
                };
                println!("{rendered}");
            }
            AnalysisResponse::Rejected(message) => {
                rejected += 1;
                if labelled {
                    eprintln!("{}: {}", source, message);
                } else {
                    eprintln!("{message}");
                }
            }
        }
    }

    Ok(if rejected > 0 {
        ExitCode::from(EXIT_REJECTED)
    } else {
        ExitCode::SUCCESS
    })
}

async fn graph_file(file: Option<PathBuf>, args: &SourceArgs, pretty: bool) -> Result<ExitCode> {
    let source = Source::from_arg(file);

    match respond(&source, args).await? {
        AnalysisResponse::Summary(summary) => {
            let graph = relationship_graph(&summary);
            println!("{}", render_json(&graph, use_pretty_json(pretty))?);
            Ok(ExitCode::SUCCESS)
        }
        AnalysisResponse::Rejected(message) => {
            eprintln!("{message}");
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}

async fn tree_file(
    file: Option<PathBuf>,
    args: &SourceArgs,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExitCode> {
    let source = Source::from_arg(file);

    match respond(&source, args).await? {
        AnalysisResponse::Summary(summary) => {
            let tree = statement_tree(&summary);
            let rendered = match format {
                OutputFormat::Json => render_json(&tree, use_pretty_json(pretty))?,
                OutputFormat::Text => render_tree(&tree),
            };
            println!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        AnalysisResponse::Rejected(message) => {
            eprintln!("{message}");
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}
