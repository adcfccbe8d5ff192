//! # Cycle Video Builder
//!
//! One invocation, one boomerang:
//! 1. Argument check - an input path must be present
//! 2. Existence check - the path must name a regular file
//! 3. Output naming - derive the output path inside the injected directory
//! 4. Progress report - print input, output and a start notice
//! 5. Engine invocation - a single blocking forward+reverse composition
//! 6. Result interpretation - success names the output, failure stays generic

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    engine::{CompositionRequest, Engine, EngineOutcome},
    error::{CycleError, Result},
    naming::{InputSpec, OutputSpec},
};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// The engine wrote the cycle video.
    Created { output: PathBuf },

    /// Dry run: the engine was not invoked.
    Planned { output: PathBuf, command: String },
}

impl RunSummary {
    pub fn output(&self) -> &Path {
        match self {
            Self::Created { output } | Self::Planned { output, .. } => output,
        }
    }
}

/// Builds a forward-then-reverse video from one input clip.
pub struct CycleVideoBuilder<E: Engine> {
    engine: E,
    output_dir: PathBuf,
    overwrite: bool,
    dry_run: bool,
}

impl<E: Engine> CycleVideoBuilder<E> {
    /// Create a builder writing into `output_dir`.
    pub fn new<P: Into<PathBuf>>(engine: E, output_dir: P) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
            overwrite: true,
            dry_run: false,
        }
    }

    /// Whether the engine may replace an existing output file.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Stop after printing the engine command.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the whole transformation for `input`, writing status lines to `out`.
    ///
    /// Usage and precondition errors return before anything is printed or
    /// the engine is touched. The engine is invoked exactly once otherwise.
    pub fn run<W: Write>(&self, input: Option<&Path>, out: &mut W) -> Result<RunSummary> {
        let input = input.ok_or(CycleError::Usage)?;
        let input = InputSpec::new(input)?;
        let output = OutputSpec::derive(&input, &self.output_dir);

        if !output.suffix_matched() {
            debug!("Input name has no .mp4 suffix; keeping full base name {:?}", output.stem());
        }

        writeln!(out, "Input:  {}", input.resolved_path().display())?;
        writeln!(out, "Output: {}", output.path().display())?;

        let request = CompositionRequest::new(input.path(), output.path())
            .with_overwrite(self.overwrite);

        if self.dry_run {
            let command = self.engine.describe(&request);
            writeln!(out, "Dry run, would execute:\n  {}", command)?;
            return Ok(RunSummary::Planned {
                output: output.path().to_path_buf(),
                command,
            });
        }

        writeln!(out, "Creating cycle video...")?;
        out.flush()?;

        info!("Invoking {} for {:?}", self.engine.name(), input.path());
        match self.engine.compose(&request) {
            EngineOutcome::Success(path) => {
                info!("{} finished: {:?}", self.engine.name(), path);
                writeln!(out, "Cycle video created: {}", path.display())?;
                Ok(RunSummary::Created { output: path })
            }
            EngineOutcome::Failure(diagnostic) => {
                info!("{} reported failure", self.engine.name());
                debug!("{} diagnostic: {}", self.engine.name(), diagnostic);
                Err(CycleError::Engine {
                    engine: self.engine.name().to_string(),
                    diagnostic,
                })
            }
        }
    }
}
