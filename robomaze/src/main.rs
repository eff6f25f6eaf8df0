//! robomaze: a grid robot that collects markers and brings them home.

mod cli;

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use robomaze_crossterm::TerminalCanvas;
use robomaze_sim::{GenerateParams, Maze, MazeSettings, NullCanvas, SolveReport, generate_random};
use tracing_subscriber::EnvFilter;

use cli::{Command, Options, Source};

/// Pause between two robot steps on the terminal.
const STEP_DELAY: Duration = Duration::from_millis(100);

/// How long the final state stays on screen.
const FINAL_PAUSE: Duration = Duration::from_secs(1);

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn settings(opts: &Options) -> Result<MazeSettings, Box<dyn Error>> {
    let settings = match &opts.source {
        Source::Random { seed } => {
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(*s),
                None => StdRng::from_os_rng(),
            };
            generate_random(&GenerateParams::default(), &mut rng)?
        }
        Source::File(path) => MazeSettings::load(path)?,
    };
    if let Some(path) = &opts.save {
        settings.save(path)?;
        log::info!("saved maze settings to {}", path.display());
    }
    Ok(settings)
}

fn run(opts: &Options) -> Result<SolveReport, Box<dyn Error>> {
    let mut maze = Maze::build(settings(opts)?)?;
    if !maze.validate() {
        return Err("the arena is not fully connected".into());
    }

    if opts.headless {
        let mut ctx = maze.render_context(NullCanvas);
        return Ok(maze.solve(&mut ctx));
    }

    let mut canvas = TerminalCanvas::new();
    canvas.init()?;
    let mut ctx = maze.render_context(canvas).with_delay(STEP_DELAY);
    let report = maze.solve(&mut ctx);
    std::thread::sleep(FINAL_PAUSE);
    let err = ctx.take_error();
    ctx.into_canvas().close();
    match err {
        Some(e) => Err(e),
        None => Ok(report),
    }
}

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "robomaze".to_string());
    let opts = match cli::parse_args(args) {
        Ok(Command::Help) => {
            print!("{}", cli::usage(&program));
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(opts)) => opts,
        Err(e) => {
            eprintln!("{e}");
            eprint!("{}", cli::usage(&program));
            return ExitCode::from(2);
        }
    };
    log::debug!("{opts:?}");

    match run(&opts) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{program}: {e}");
            ExitCode::FAILURE
        }
    }
}
