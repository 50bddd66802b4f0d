use std::{
    io::{self, Read},
    process::ExitCode,
    time::Duration,
};

use clap::{Parser as ClapParser, Subcommand};
use pipette_lang::{
    Runtime,
    cli::{self, CheckOptions, CheckResult, CliError, RunOptions},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser)]
#[command(name = "pipette")]
#[command(about = "Pipette - run piped filter expressions against text and request data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a filter expression and print chain values and context
    Run {
        /// The filter expression to evaluate
        expression: String,

        /// Text returned by the `stdin` function (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// JSON request object (`{query, headers, url}`) exposed to request functions
        #[arg(short, long)]
        request: Option<String>,

        /// JSON object to start the context with
        #[arg(short, long)]
        context: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Abort evaluation after this many milliseconds (0 disables the limit)
        #[arg(long, default_value_t = 2000)]
        timeout_ms: u64,
    },

    /// Validate expression syntax without running it
    Check {
        /// The filter expression to validate
        expression: String,

        /// Print the parsed tree
        #[arg(long)]
        tree: bool,
    },

    /// List the built-in functions
    Functions,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Respects RUST_LOG; logs go to stderr so stdout stays JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            expression,
            input,
            request,
            context,
            pretty,
            timeout_ms,
        } => run(expression, input, request, context, pretty, timeout_ms).await,
        Commands::Check { expression, tree } => check(expression, tree),
        Commands::Functions => {
            for name in Runtime::new().functions().names() {
                println!("{}", name);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    expression: String,
    input: Option<String>,
    request: Option<String>,
    context: Option<String>,
    pretty: bool,
    timeout_ms: u64,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RunOptions {
        expression,
        input,
        request,
        context,
        timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
    };

    let output = cli::execute_run(&options).await?;
    let report = serde_json::json!({
        "values": output.values,
        "context": output.context,
    });

    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }?;
    println!("{}", json);
    Ok(())
}

fn check(expression: String, tree: bool) -> Result<(), CliError> {
    match cli::execute_check(&CheckOptions { expression, tree })? {
        CheckResult::SyntaxValid { chains } => {
            println!("Syntax is valid ({} chain{})", chains, if chains == 1 { "" } else { "s" });
        }
        CheckResult::Tree(tree) => println!("{:#?}", tree),
    }
    Ok(())
}
