use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use scriptit::{
    error::Error,
    interpreter::{evaluator::core::Context, lexer::tokenize, value::core::Value},
    run_program, run_statement,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// scriptit runs programs written in ScriptIt, a small scripting language
/// whose statements end with a dot. Without arguments it starts an
/// interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A script file to run.
    #[arg(conflicts_with_all = ["script", "command"])]
    file: Option<PathBuf>,

    /// Reads the whole script from standard input.
    #[arg(short, long)]
    script: bool,

    /// Runs the given source text instead of a file.
    #[arg(short, long, conflicts_with = "script")]
    command: Option<String>,
}

const ESCAPE_CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = if let Some(path) = &args.file {
        match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: Cannot open file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            },
        }
    } else if args.script {
        let mut source = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut source) {
            eprintln!("Error: Cannot read standard input: {e}");
            return ExitCode::FAILURE;
        }
        source
    } else if let Some(command) = args.command {
        command
    } else {
        repl();
        return ExitCode::SUCCESS;
    };

    let mut context = Context::new();
    if let Err(e) = run_program(&source, &mut context) {
        println!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Installs the log subscriber. `RUST_LOG` selects the level, `warn` by
/// default; logs go to stderr so they never mix with program output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(filter)
                                  .init();
}

fn repl() {
    println!("ScriptIt REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit, 'clear' to clear screen, 'wipe' for fresh start.");

    let mut context = Context::new();
    context.scope.define("ans", Value::Integer(0));

    loop {
        if context.write_prompt(">> ", 0).is_err() {
            break;
        }
        let line = match context.next_input_line(0) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            },
        };

        match line.trim() {
            "" => {},
            "exit" => break,
            "clear" => {
                print!("{ESCAPE_CLEAR_SCREEN}");
            },
            "wipe" => {
                print!("{ESCAPE_CLEAR_SCREEN}");
                context.reset();
                context.scope.define("ans", Value::Integer(0));
                println!("Session wiped. All variables and functions cleared.");
            },
            source => {
                if let Err(e) = run_line(&mut context, source) {
                    println!("Error: {e}");
                }
            },
        }
    }
}

/// Runs one REPL line, printing a trailing expression's value and storing it
/// in `ans`.
fn run_line(context: &mut Context, source: &str) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    if let Some(value) = run_statement(&tokens, context)? {
        context.write_line(&value.to_string(), 0)?;
        context.scope.define("ans", value);
    }
    Ok(())
}
