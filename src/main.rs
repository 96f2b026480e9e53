use argh::FromArgs;
use minish::{Control, Editor, ExitCode, Interpreter, LineSource, PlainLines};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// A minimal interactive command shell.
struct Opts {
    #[argh(option, short = 'c')]
    /// run a single command line and exit
    command: Option<String>,

    #[argh(option, short = 'p', default = "String::from(\"$ \")")]
    /// prompt printed before each line is read
    prompt: String,

    #[argh(switch, short = 'v')]
    /// log debug information to standard error
    verbose: bool,
}

fn main() {
    let opts: Opts = argh::from_env();
    init_tracing(opts.verbose);

    let code = match run(opts) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("minish: {err:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(opts: Opts) -> anyhow::Result<ExitCode> {
    let mut sh = Interpreter::default();
    let mut out = io::stdout();
    let mut err = io::stderr();

    if let Some(line) = opts.command {
        return Ok(match sh.run_line(&line, &mut out, &mut err)? {
            Control::Exit(code) => code,
            Control::Continue => 0,
        });
    }

    let mut lines: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Editor::new()?)
    } else {
        Box::new(PlainLines::new(io::stdin().lock(), io::stdout()))
    };
    sh.repl(lines.as_mut(), &opts.prompt, &mut out, &mut err)
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
