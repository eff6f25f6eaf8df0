//! Command-line parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Where the maze comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Random { seed: Option<u64> },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub source: Source,
    /// Write the settings of the maze to this file before solving.
    pub save: Option<PathBuf>,
    /// Solve without drawing.
    pub headless: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Missing file name")]
    MissingFile,
    #[error("Missing value after {0}")]
    MissingValue(&'static str),
    #[error("Invalid seed: {0}")]
    BadSeed(String),
    #[error("Invalid option: {0}")]
    Unknown(String),
    #[error("-random and -file cannot be combined")]
    Conflict,
    #[error("-seed only applies to random mazes")]
    SeedWithFile,
}

pub fn usage(program: &str) -> String {
    format!(
        "\
{program} -random [-seed <n>]  : generates a random maze and solves it
{program} -file <filename>     : builds the maze described in filename and solves it
{program} -help                : displays this message

Options:
  -save <filename>  write the maze settings to filename before solving
  -headless         solve without drawing and only print the summary
"
    )
}

/// Parse the arguments following the program name.
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut random = false;
    let mut seed = None;
    let mut file = None;
    let mut save = None;
    let mut headless = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-help" => return Ok(Command::Help),
            "-random" => random = true,
            "-file" => file = Some(PathBuf::from(args.next().ok_or(UsageError::MissingFile)?)),
            "-seed" => {
                let v = args.next().ok_or(UsageError::MissingValue("-seed"))?;
                seed = Some(v.parse::<u64>().map_err(|_| UsageError::BadSeed(v))?);
            }
            "-save" => {
                let v = args.next().ok_or(UsageError::MissingValue("-save"))?;
                save = Some(PathBuf::from(v));
            }
            "-headless" => headless = true,
            other => return Err(UsageError::Unknown(other.to_string())),
        }
    }

    let source = match file {
        Some(_) if random => return Err(UsageError::Conflict),
        Some(_) if seed.is_some() => return Err(UsageError::SeedWithFile),
        Some(path) => Source::File(path),
        None => Source::Random { seed },
    };
    Ok(Command::Run(Options {
        source,
        save,
        headless,
    }))
}
