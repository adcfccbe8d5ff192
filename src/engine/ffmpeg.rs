use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::engine::{
    shell_quote, CompositionRequest, Diagnostic, Engine, EngineOutcome, CYCLE_FILTER_GRAPH,
    CYCLE_OUTPUT_PAD,
};

/// Number of trailing stderr lines kept in a failure diagnostic.
const STDERR_TAIL_LINES: usize = 20;

/// Engine backed by an external `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    program: PathBuf,
    log_level: String,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegEngine {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            log_level: "error".to_string(),
        }
    }

    /// Value passed to ffmpeg's `-loglevel`.
    pub fn with_log_level<S: Into<String>>(mut self, log_level: S) -> Self {
        self.log_level = log_level.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for `request`, program excluded.
    pub fn arguments(&self, request: &CompositionRequest) -> Vec<OsString> {
        let overwrite_flag = if request.overwrite { "-y" } else { "-n" };

        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            self.log_level.clone().into(),
            overwrite_flag.into(),
            "-i".into(),
        ];
        args.push(file_argument(&request.input));
        args.extend(
            [
                "-filter_complex",
                CYCLE_FILTER_GRAPH,
                "-map",
                CYCLE_OUTPUT_PAD,
                "-an",
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(file_argument(&request.output));
        args
    }

    fn command(&self, request: &CompositionRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.arguments(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Engine for FfmpegEngine {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn compose(&self, request: &CompositionRequest) -> EngineOutcome {
        debug!("Running: {}", self.describe(request));

        let output = match self.command(request).output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to start {}: {}", self.program.display(), e);
                return EngineOutcome::Failure(Diagnostic::new(
                    None,
                    format!("failed to start {}: {}", self.program.display(), e),
                ));
            }
        };

        debug!("{} exited with {}", self.program.display(), output.status);

        if output.status.success() {
            return EngineOutcome::Success(request.output.clone());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr_tail(&stderr, STDERR_TAIL_LINES);
        debug!("{} stderr:\n{}", self.program.display(), detail);

        EngineOutcome::Failure(Diagnostic::new(output.status.code(), detail))
    }

    fn describe(&self, request: &CompositionRequest) -> String {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.arguments(request))
            .map(|arg| shell_quote(&arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// ffmpeg reads a bare `-` as stdin and `name:rest` as a protocol URL, so
/// relative paths are anchored at `./` to keep them plain files.
fn file_argument(path: &Path) -> OsString {
    if path.is_absolute() || path.starts_with(".") || path.starts_with("..") {
        path.as_os_str().to_os_string()
    } else {
        Path::new(".").join(path).into_os_string()
    }
}

fn stderr_tail(stderr: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].join("\n")
}
