//! Optimize command implementation.
//!
//! Runs every input through the pipeline in parallel, then reports results
//! in input order: to stdout by default, or as files under `--out-dir`.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::cli::args::OptimizeArgs;
use crate::config::RevectorConfig;
use crate::core::OptimizeResult;
use crate::pipeline::Pipeline;
use crate::{debug, log};

/// One input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Name shown in logs.
    fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// File name used to derive the component identifier, if any.
    fn file_name(&self) -> Option<&str> {
        match self {
            Self::Stdin => None,
            Self::File(path) => path.file_name().and_then(|n| n.to_str()),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
            Self::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Where `--out-dir` puts one input's results.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputPaths {
    svg: PathBuf,
    code: PathBuf,
}

/// Execute optimize command
pub fn run_optimize(args: &OptimizeArgs, config: &RevectorConfig) -> Result<()> {
    let inputs = collect_inputs(args)?;
    let outputs = match &args.out_dir {
        Some(dir) => Some(plan_outputs(dir, &inputs, args, config)?),
        None => None,
    };
    let pipeline = Pipeline::new();

    debug!("optimize"; "processing {} input(s)", inputs.len());

    let results: Vec<OptimizeResult> = inputs
        .par_iter()
        .map(|input| process(&pipeline, input, args, config))
        .collect();

    let mut failed = 0;
    for (index, result) in results.iter().enumerate() {
        if !result.is_success() {
            failed += 1;
        }

        match &outputs {
            Some(outputs) => {
                if write_outputs(&outputs[index], result)? {
                    log!("optimize"; "wrote {}", outputs[index].code.display());
                }
            }
            None if args.json => println!("{}", serde_json::to_string(result)?),
            None => print!("{}", result.component_code().unwrap_or_default()),
        }
    }

    if failed > 0 {
        bail!("{} of {} input(s) failed", failed, results.len());
    }
    Ok(())
}

/// Validate the argument combination and map paths to inputs.
fn collect_inputs(args: &OptimizeArgs) -> Result<Vec<Input>> {
    let inputs: Vec<Input> = args.paths.iter().map(|p| Input::from_path(p)).collect();

    if inputs.iter().filter(|i| **i == Input::Stdin).count() > 1 {
        bail!("`-` (stdin) may only be given once");
    }
    if args.name.is_some() && inputs.len() > 1 {
        bail!("--name can only be used with a single input");
    }

    Ok(inputs)
}

/// Name the component of `input` is derived from.
fn component_name<'a>(input: &'a Input, args: &'a OptimizeArgs) -> Option<&'a str> {
    args.name.as_deref().or_else(|| input.file_name())
}

/// Read one input and run it. Pipeline failures are logged by the pipeline;
/// read failures never reach it and are logged here.
fn process(
    pipeline: &Pipeline,
    input: &Input,
    args: &OptimizeArgs,
    config: &RevectorConfig,
) -> OptimizeResult {
    match input.read() {
        Ok(raw_svg) => pipeline.run(&config.generate.request(raw_svg, component_name(input, args))),
        Err(e) => {
            let message = format!("{e:#}");
            log!("error"; "{}: {}", input.label(), message);
            OptimizeResult::failure(message)
        }
    }
}

/// Decide every output path up front, refusing plans where two inputs
/// write the same file or an output replaces an input.
fn plan_outputs(
    dir: &Path,
    inputs: &[Input],
    args: &OptimizeArgs,
    config: &RevectorConfig,
) -> Result<Vec<OutputPaths>> {
    let sources: Vec<PathBuf> = inputs
        .iter()
        .filter_map(|input| match input {
            Input::File(path) => path.canonicalize().ok(),
            Input::Stdin => None,
        })
        .collect();

    let mut claimed = HashSet::new();
    let mut plans = Vec::with_capacity(inputs.len());

    for input in inputs {
        let request = config
            .generate
            .request(String::new(), component_name(input, args));
        let identifier = request.identifier();
        let stem = match input {
            Input::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| identifier.to_string()),
            Input::Stdin => identifier.to_string(),
        };

        let paths = OutputPaths {
            svg: dir.join(format!("{stem}.svg")),
            code: dir.join(format!("{}.{}", identifier, request.target().extension())),
        };

        for path in [&paths.svg, &paths.code] {
            // case-insensitive file systems fold names together
            if !claimed.insert(path.to_string_lossy().to_lowercase()) {
                bail!(
                    "{} would be written by more than one input",
                    path.display()
                );
            }
            if path.canonicalize().is_ok_and(|p| sources.contains(&p)) {
                bail!("refusing to overwrite input {}", path.display());
            }
        }

        plans.push(paths);
    }

    Ok(plans)
}

/// Write the optimized SVG and component for a successful result.
fn write_outputs(paths: &OutputPaths, result: &OptimizeResult) -> Result<bool> {
    let (Some(svg), Some(code)) = (result.optimized_svg(), result.component_code()) else {
        return Ok(false);
    };

    if let Some(dir) = paths.svg.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for (path, content) in [(&paths.svg, svg), (&paths.code, code)] {
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(true)
}
