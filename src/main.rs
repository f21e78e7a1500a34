use clap::{Parser as ClapParser, Subcommand};
use nestql::Config;
use nestql::cli::{self, AggsOptions, CliError, CompileOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "nestql")]
#[command(about = "nestql - A query language for nested documents, compiled to search-backend query trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query into a search request body
    Compile {
        /// The query to compile (reads one query per line from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Print the syntax tree instead of the compiled query
        #[arg(long)]
        tree: bool,

        /// Only validate syntax, don't compile
        #[arg(long)]
        syntax_only: bool,

        /// JSON output config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compile an aggregation spec into a request body
    Aggs {
        /// JSON aggregation spec (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// JSON output config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Flatten the aggregations of a backend response
    Flatten {
        /// JSON response (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'nestql docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            query,
            pretty,
            tree,
            syntax_only,
            config,
        } => run_compile(query, pretty, tree, syntax_only, config),
        Commands::Aggs { input, pretty, config } => run_aggs(input, pretty, config),
        Commands::Flatten { input, pretty } => run_flatten(input, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Use `input` when given, otherwise read stdin unless it is a terminal.
fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_compile(
    query: Option<String>,
    pretty: bool,
    tree: bool,
    syntax_only: bool,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    let options = CompileOptions {
        query: String::new(),
        syntax_only,
        tree,
        config: load_config(config)?,
    };

    match query {
        Some(query) => {
            let output = cli::execute_compile(&CompileOptions { query, ..options })?;
            println!("{}", output.render(pretty)?);
        }
        None => {
            let input = read_input(None)?.ok_or(CliError::NoInput)?;
            for output in cli::execute_compile_lines(&input, &options)? {
                println!("{}", output.render(pretty)?);
            }
        }
    }
    Ok(())
}

fn run_aggs(input: Option<String>, pretty: bool, config: Option<PathBuf>) -> Result<(), CliError> {
    let options = AggsOptions {
        input: read_input(input)?,
        config: load_config(config)?,
    };

    let body = cli::execute_aggs(&options)?;
    println!("{}", cli::render_json(&body, pretty)?);
    Ok(())
}

fn run_flatten(input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = read_input(input)?;
    let body = cli::execute_flatten(input.as_deref())?;
    println!("{}", cli::render_json(&body, pretty)?);
    Ok(())
}
