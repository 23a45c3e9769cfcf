//! Optimize-and-generate pipeline.
//!
//! # Architecture
//!
//! ```text
//! request ──► validate ──► optimize ──► generate ──► format ──► OptimizeResult
//!                │             │                        │
//!                └─────────────┴──── any error ─────────┴──► Failure { message }
//! ```
//!
//! Stages run in strict order; a failure discards everything produced so far.
//! Nothing is shared between runs, so one `Pipeline` can serve any number of
//! threads.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use thiserror::Error;

use crate::core::{FALLBACK_ERROR, OptimizeRequest, OptimizeResult};
use crate::format::{CodeFormatter, FormatError, FormatStyle, ParserHint, SourceFormatter};
use crate::generator::generate;
use crate::svg::{OptimizeConfig, OptimizeError, SvgOptimizer, UsvgOptimizer};
use crate::{debug, log};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub optimized_svg: String,
    pub component_code: String,
}

/// Request orchestrator over injected optimizer and formatter.
#[derive(Debug, Clone)]
pub struct Pipeline<O = UsvgOptimizer, F = SourceFormatter> {
    optimizer: O,
    formatter: F,
}

impl Pipeline {
    /// Pipeline backed by usvg and the built-in formatter.
    pub const fn new() -> Self {
        Self::with(UsvgOptimizer, SourceFormatter)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SvgOptimizer, F: CodeFormatter> Pipeline<O, F> {
    pub const fn with(optimizer: O, formatter: F) -> Self {
        Self {
            optimizer,
            formatter,
        }
    }

    /// Validate an untyped request, then run it.
    pub fn run_json(&self, value: serde_json::Value) -> OptimizeResult {
        match OptimizeRequest::from_json(value) {
            Ok(request) => self.run(&request),
            Err(message) => Self::failure(None, &PipelineError::Validation(message)),
        }
    }

    /// Run a request. Never panics or returns an error: every failure,
    /// including a collaborator panic, becomes [`OptimizeResult::Failure`].
    pub fn run(&self, request: &OptimizeRequest) -> OptimizeResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_run(request))) {
            Ok(Ok(generated)) => {
                OptimizeResult::success(generated.optimized_svg, generated.component_code)
            }
            Ok(Err(e)) => Self::failure(Some(&request.file_name), &e),
            Err(_) => {
                log!("error"; "pipeline panicked while processing `{}`", request.file_name);
                OptimizeResult::failure(FALLBACK_ERROR)
            }
        }
    }

    /// Run a request, surfacing the stage error.
    pub fn try_run(&self, request: &OptimizeRequest) -> Result<Generated, PipelineError> {
        request.validate().map_err(PipelineError::Validation)?;

        let started = Instant::now();
        let optimized_svg = self
            .optimizer
            .optimize(&request.raw_svg, &OptimizeConfig::pipeline())?;
        debug!("pipeline"; "optimized {} -> {} bytes in {:?}",
            request.raw_svg.len(), optimized_svg.len(), started.elapsed());

        let target = request.target();
        let source = generate(&optimized_svg, &request.identifier(), target);

        let started = Instant::now();
        let hint = ParserHint::for_framework(request.framework);
        let component_code = self
            .formatter
            .format(&source, hint, &FormatStyle::PIPELINE)?;
        debug!("pipeline"; "formatted {:?} as {} in {:?}", target, hint, started.elapsed());

        Ok(Generated {
            optimized_svg,
            component_code,
        })
    }

    /// The single log line for a failed request.
    fn failure(file_name: Option<&str>, error: &PipelineError) -> OptimizeResult {
        match file_name {
            Some(name) => log!("error"; "{}: {}", name, error),
            None => log!("error"; "{}", error),
        }
        OptimizeResult::failure(error.to_string())
    }
}
