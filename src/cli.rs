//! Command-line front end: `cycle-video [OPTIONS] <input-file>`.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    builder::CycleVideoBuilder,
    config::Config,
    error::{CycleError, Result},
};

#[derive(Parser, Debug)]
#[command(
    name = "cycle-video",
    version,
    about = "Turn a video clip into a forward-then-reverse boomerang loop",
    long_about = "cycle-video plays a clip forward, then immediately in reverse, producing a seamless back-and-forth loop. \
                  The output is written as cycle_<name> and is always video-only."
)]
pub struct Cli {
    /// Input video file (e.g. clip.mp4)
    pub input: Option<PathBuf>,

    /// Directory for the output file [default: current directory]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Engine executable to run instead of `ffmpeg`
    #[arg(long)]
    pub engine: Option<PathBuf>,

    /// Print the engine command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse `args` (program name first), run, and map the outcome to an exit code.
pub fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(CycleError::Usage.exit_code());
        }
    };

    init_logging(cli.verbose);

    let stdout = io::stdout();
    match execute(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Run failed: {}", e);
            let _ = writeln!(io::stderr(), "Error: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Run a parsed command line, writing status lines to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    // Nothing may be read before the usage check.
    let Some(input) = cli.input.as_deref() else {
        return Err(CycleError::Usage);
    };

    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            debug!("Using default configuration");
            Config::default()
        }
    };

    debug!("Effective configuration:\n{}", config.to_toml()?);

    let mut engine_config = config.engine.clone();
    if let Some(program) = &cli.engine {
        engine_config.program = program.clone();
    }

    let output_dir = cli
        .output_dir
        .clone()
        .or(config.output.directory)
        .unwrap_or_else(|| PathBuf::from("."));

    debug!("Engine: {:?}, output directory: {:?}", engine_config.program, output_dir);

    CycleVideoBuilder::new(engine_config.build_engine(), output_dir)
        .overwrite(engine_config.overwrite)
        .dry_run(cli.dry_run)
        .run(Some(input), out)?;

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cycle-video").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_input_is_optional_at_parse_time() {
        let cli = parse(&[]);
        assert!(cli.input.is_none());
        assert!(matches!(execute(&cli, &mut Vec::new()), Err(CycleError::Usage)));
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&["-o", "renders", "--engine", "/opt/ffmpeg", "--dry-run", "-v", "clip.mp4"]);
        assert_eq!(cli.input, Some(PathBuf::from("clip.mp4")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("renders")));
        assert_eq!(cli.engine, Some(PathBuf::from("/opt/ffmpeg")));
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(Cli::try_parse_from(["cycle-video", "a.mp4", "b.mp4"]).is_err());
    }

    #[test]
    fn test_usage_checked_before_config() {
        let cli = parse(&["-c", "/definitely/not/here.toml"]);
        assert!(matches!(execute(&cli, &mut Vec::new()), Err(CycleError::Usage)));
    }

    #[test]
    fn test_dry_run_uses_config_and_flags() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"").unwrap();

        let config_path = dir.path().join("cycle.toml");
        std::fs::write(
            &config_path,
            "[engine]\nprogram = \"from-config\"\noverwrite = false\n\n[output]\ndirectory = \"configured\"\n",
        )
        .unwrap();

        let cli = parse(&[
            "-c",
            config_path.to_str().unwrap(),
            "--engine",
            "from-flag",
            "--dry-run",
            input.to_str().unwrap(),
        ]);

        let mut out = Vec::new();
        execute(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("from-flag -hide_banner"));
        assert!(text.contains(" -n "));
        assert!(text.contains(&format!("Output: {}", PathBuf::from("configured").join("cycle_clip.mp4").display())));
    }
}
