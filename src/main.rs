use clap::{Parser as ClapParser, Subcommand};
use qmellow::cli::{self, CheckOptions, CheckResult, CliError};
use std::{
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "qmellow")]
#[command(about = "qmellow - boolean queries over document references and text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a query against subject documents
    Check {
        /// The qmellow query
        query: String,

        /// Subject documents (reads one from stdin if none are given)
        files: Vec<PathBuf>,

        /// Emit JSON
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print a query in canonical form
    Fmt {
        /// The qmellow query
        query: String,
    },

    /// Prompt for queries and evaluate them against subject documents
    Repl {
        /// Subject documents
        files: Vec<PathBuf>,
    },

    /// Show the language reference
    Syntax,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Check {
            query,
            files,
            json,
            pretty,
            syntax_only,
        } => run_check(query, files, json, pretty, syntax_only),
        Commands::Fmt { query } => cli::execute_fmt(&query).map(|text| println!("{}", text)),
        Commands::Repl { files } => run_repl(files),
        Commands::Syntax => {
            print!("{}", cli::get_syntax_reference());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: String,
    files: Vec<PathBuf>,
    json: bool,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let stdin = if files.is_empty() && !syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Some(buffer)
    } else {
        None
    };

    let options = CheckOptions {
        query,
        files,
        stdin,
        json,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("Syntax is valid: {}", canonical),
        CheckResult::Evaluated { output, .. } => {
            print!("{}", output);
            if json {
                println!();
            }
        }
    }
    Ok(())
}

fn run_repl(files: Vec<PathBuf>) -> Result<(), CliError> {
    let subjects = cli::load_subjects(&files)?;
    log::info!("loaded {} subject document(s)", subjects.len());

    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    cli::run_repl(stdin.lock(), &mut stdout, &subjects, interactive)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
