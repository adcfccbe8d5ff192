//! # Media Engine
//!
//! The engine is the external collaborator that decodes, reverses,
//! concatenates and encodes. This crate only builds the request and reads back
//! a tagged outcome; codec details stay on the engine's side.

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;

mod ffmpeg;

pub use ffmpeg::FfmpegEngine;

/// Filter graph for the forward+reverse composition: stream `r` is the
/// reversed input video, `out` is the input followed by `r`, video only.
pub const CYCLE_FILTER_GRAPH: &str = "[0:v]reverse[r];[0:v][r]concat=n=2:v=1:a=0[out]";

/// Output pad of [`CYCLE_FILTER_GRAPH`].
pub const CYCLE_OUTPUT_PAD: &str = "[out]";

/// One forward+reverse composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionRequest {
    /// Sole video source
    pub input: PathBuf,

    /// Sole destination
    pub output: PathBuf,

    /// Let the engine replace an existing output file
    pub overwrite: bool,
}

impl CompositionRequest {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            overwrite: true,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Whatever the engine left behind when it failed. Opaque to callers: it is
/// logged, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Process exit code, if the engine ran and exited normally
    pub status: Option<i32>,

    pub detail: String,
}

impl Diagnostic {
    pub fn new<S: Into<String>>(status: Option<i32>, detail: S) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "exit status {}", code)?,
            None => write!(f, "no exit status")?,
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// Result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// The engine reported success; the output was written at this path.
    Success(PathBuf),

    /// The engine reported failure. Nothing is claimed about the output file.
    Failure(Diagnostic),
}

/// Common interface for media engines.
///
/// [`Engine::compose`] is called at most once per run and blocks until the
/// engine is done. There is no timeout.
pub trait Engine {
    /// Short engine name used in logs and errors.
    fn name(&self) -> &str;

    /// Run the forward+reverse composition described by `request`.
    fn compose(&self, request: &CompositionRequest) -> EngineOutcome;

    /// Human-readable command line for `request`, used by dry runs.
    fn describe(&self, request: &CompositionRequest) -> String;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compose(&self, request: &CompositionRequest) -> EngineOutcome {
        (**self).compose(request)
    }

    fn describe(&self, request: &CompositionRequest) -> String {
        (**self).describe(request)
    }
}

/// Quote one argument for display as a POSIX shell word. Non UTF-8 bytes
/// are shown lossily; the quoted form is never executed.
pub fn shell_quote(word: &OsStr) -> String {
    let word = word.to_string_lossy();
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return word.into_owned();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "_-./:@%=+,".contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_graph_is_video_only() {
        assert!(CYCLE_FILTER_GRAPH.contains("reverse"));
        assert!(CYCLE_FILTER_GRAPH.contains("concat=n=2:v=1:a=0"));
        assert!(CYCLE_FILTER_GRAPH.ends_with(CYCLE_OUTPUT_PAD));
    }

    #[test]
    fn test_shell_quote() {
        let quote = |word: &str| shell_quote(OsStr::new(word));
        assert_eq!(quote("./clip.mp4"), "./clip.mp4");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("my clip.mp4"), "'my clip.mp4'");
        assert_eq!(quote("it's.mp4"), r"'it'\''s.mp4'");
        assert_eq!(quote("café.mp4"), "'café.mp4'");
        assert_eq!(quote(CYCLE_OUTPUT_PAD), "'[out]'");
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(Some(183), "Conversion failed!");
        assert_eq!(diagnostic.to_string(), "exit status 183: Conversion failed!");
        assert_eq!(Diagnostic::new(None, "").to_string(), "no exit status");
    }

    #[test]
    fn test_request_defaults_to_overwrite() {
        let request = CompositionRequest::new("in.mp4", "cycle_in.mp4");
        assert!(request.overwrite);
        assert!(!request.with_overwrite(false).overwrite);
    }
}
