//! cmdspec CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use cmdspec_runtime::{Repl, Session, run_batch};
use tracing_subscriber::{EnvFilter, fmt};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    grammar: Option<String>,
    players: Option<String>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` overrides the default filter.
fn init_logging(trace: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if trace {
            EnvFilter::new("warn,cmdspec_grammar=trace,cmdspec_runtime=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "-p" | "--players" => {
                i += 1;
                if i >= args.len() {
                    return Err("--players requires a file".into());
                }
                config.players = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.grammar.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.grammar = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if config.show_version {
        println!("cmdspec {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    init_logging(config.trace);

    let mut session = Session::new();
    if let Some(grammar) = &config.grammar {
        session.load_grammar(grammar)?;
    }
    if let Some(players) = &config.players {
        session.load_roster(players)?;
    }

    if config.batch_mode {
        if config.grammar.is_none() {
            return Err("batch mode needs a grammar file".into());
        }
        let stdin = io::stdin();
        let rejected = run_batch(&session, stdin.lock(), io::stdout().lock())?;
        return Ok(if rejected == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut repl = Repl::new()?.with_session(session);
    repl.run()?;
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        "\x1b[1mcmdspec\x1b[0m - Check commands against a grammar, with live completion

\x1b[1mUSAGE:\x1b[0m
    cmdspec [OPTIONS] [GRAMMAR.json]

\x1b[1mARGUMENTS:\x1b[0m
    [GRAMMAR.json]    Grammar to load before starting the prompt

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -p, --players FILE    Load player names from a JSON file
    -b, --batch           Check commands from stdin, one per line, and exit

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace               Log every matcher call (RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    cmdspec game.json                       Start the prompt for game.json
    cmdspec game.json --players roster.json Resolve player names too
    cmdspec -b game.json < moves.txt        Check a file of commands

\x1b[1mPROMPT COMMANDS:\x1b[0m
    :help                Show prompt commands
    :suggest <text>      List completions for <text>
    :tree <text>         Print the parse tree for <text>
    Tab                  Complete at the cursor
    Ctrl+D               Exit"
    );
}
