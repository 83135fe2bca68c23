mod render;

use clap::Parser;
use render::{Pause, TapeRenderer, TraceObserver};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use utm::types::{DEFAULT_BLANK_SYMBOL, DEFAULT_END_STATE, DEFAULT_START_STATE};
use utm::{MachineConfig, Mode, ProgramLoader, ProgramManager, TransitionTable, TuringMachine};

/// Implementation of a universal Turing Machine.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Transition table, as a JSON file
    #[clap(short, long, conflicts_with = "program", required_unless_present_any = ["program", "list"])]
    instructions: Option<PathBuf>,

    /// Name of a built-in transition table (see --list)
    #[clap(short, long)]
    program: Option<String>,

    /// Input tape. Defaults to the sample input of a built-in program
    #[clap(short = 't', long, required_unless_present_any = ["program", "list"])]
    input: Option<String>,

    /// Initial state to begin
    #[clap(short = 'b', long, default_value = DEFAULT_START_STATE)]
    initial: String,

    /// End state
    #[clap(short, long, default_value = DEFAULT_END_STATE)]
    end: String,

    /// Symbol of unwritten cells
    #[clap(long, default_value_t = DEFAULT_BLANK_SYMBOL)]
    blank: char,

    /// Render the turing machine after every step
    #[clap(short, long)]
    render: bool,

    /// Rendering speed in seconds
    #[clap(short, long, default_value_t = 0.3)]
    speed: f64,

    /// Interactive mode, wait for enter after every step (speed is ignored)
    #[clap(short = 'a', long)]
    interactive: bool,

    /// Reject unknown move directions instead of treating them as "stay"
    #[clap(long)]
    strict: bool,

    /// Give up after this many steps
    #[clap(long)]
    max_steps: Option<usize>,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,
}

fn main() {
    // Logs go to stderr, stdout carries the program output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for program in ProgramManager::programs() {
            println!(
                "{:<18} {} (sample input: {:?})",
                program.name, program.description, program.sample_input
            );
        }
        return;
    }

    match run(&cli) {
        Ok((input, output)) => println!("Input: {} \nOutput: {}", input, output),
        Err(e) => {
            eprintln!("Something went wrong! Issue: {}", e);
            std::process::exit(1);
        }
    }
}

/// Loads the table, runs the machine and returns the input together with the final tape.
fn run(cli: &Cli) -> Result<(String, String), Box<dyn Error>> {
    let (table, input) = load(cli)?;
    let config = MachineConfig {
        start_state: cli.initial.clone(),
        blank: cli.blank,
        step_limit: cli.max_steps,
    };
    let mut machine = TuringMachine::new(table, &input, config);

    let output = if cli.render {
        let mut renderer = TapeRenderer::new(pause(cli)?, atty::is(atty::Stream::Stdout));
        machine.run_with(&mut renderer)?
    } else {
        machine.run_with(&mut TraceObserver)?
    };

    Ok((input, output))
}

fn load(cli: &Cli) -> Result<(TransitionTable, String), Box<dyn Error>> {
    let mode = if cli.strict { Mode::Strict } else { Mode::Normal };

    match (&cli.instructions, &cli.program) {
        (Some(path), _) => {
            let table = ProgramLoader::load_table(path, &cli.end, mode)?;
            let input = cli.input.clone().ok_or("no input tape given")?;
            Ok((table, input))
        }
        (None, Some(name)) => {
            let program = ProgramManager::get_program_by_name(name)?;
            if cli.end != DEFAULT_END_STATE {
                return Err(format!("built-in programs halt in {}", DEFAULT_END_STATE).into());
            }
            let input = cli
                .input
                .clone()
                .unwrap_or_else(|| program.sample_input.to_string());
            Ok((program.table.clone(), input))
        }
        (None, None) => Err("either --instructions or --program is required".into()),
    }
}

fn pause(cli: &Cli) -> Result<Pause, Box<dyn Error>> {
    if cli.interactive {
        return Ok(Pause::WaitForAcknowledgment);
    }

    let delay = Duration::try_from_secs_f64(cli.speed)
        .map_err(|e| format!("invalid speed {}: {}", cli.speed, e))?;
    if delay.is_zero() {
        Ok(Pause::None)
    } else {
        Ok(Pause::FixedDelay(delay))
    }
}
