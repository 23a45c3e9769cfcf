//! SVG optimization using usvg.
//!
//! Each pass parses the markup into a usvg tree and writes it back, which
//! resolves styles, converts shapes to paths, and drops metadata, comments
//! and redundant groups. The written markup is cleaned of empty containers
//! and initial values. Passes repeat until the output stops changing.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::minify::{Features, clean};
use super::root::{Scope, SvgTag};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stand-ins for `currentColor` across the usvg round trip, written the way
/// usvg writes colors (lowercase `#rrggbb`).
const COLOR_SENTINELS: &[&str] = &["#01fe02", "#fe02fd", "#02fd01", "#fd01fe"];

static CURRENT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)currentcolor").unwrap());

/// Errors raised while optimizing.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("failed to parse SVG markup: {0}")]
    Markup(String),

    #[error("document root is not an <svg> element")]
    NotSvg,

    #[error(transparent)]
    Usvg(#[from] usvg::Error),
}

/// Options for SVG optimization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeConfig {
    /// Repeat passes until the markup stabilizes.
    pub multipass: bool,
    /// Upper bound on passes when `multipass` is enabled.
    pub max_passes: usize,
    /// Strip root `width`/`height` (deriving `viewBox` if missing).
    pub remove_dimensions: bool,
    /// Attributes added to the root element after optimization.
    pub root_attributes: Vec<(String, String)>,
}

impl OptimizeConfig {
    /// Fixed configuration used by the pipeline.
    pub fn pipeline() -> Self {
        Self {
            multipass: true,
            max_passes: 10,
            remove_dimensions: true,
            root_attributes: vec![
                ("width".to_string(), "1em".to_string()),
                ("height".to_string(), "1em".to_string()),
            ],
        }
    }
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self::pipeline()
    }
}

/// Markup minimizer. Swappable so the pipeline can run against stubs.
pub trait SvgOptimizer: Send + Sync {
    fn optimize(&self, svg: &str, config: &OptimizeConfig) -> Result<String, OptimizeError>;
}

/// Optimizer backed by usvg's parse-and-write round trip.
///
/// Two candidates are built: the usvg rewrite and a structural cleanup of
/// the input. The shorter one wins. Documents with content usvg cannot
/// carry (text, foreign objects) only get the structural cleanup.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsvgOptimizer;

impl SvgOptimizer for UsvgOptimizer {
    fn optimize(&self, svg: &str, config: &OptimizeConfig) -> Result<String, OptimizeError> {
        let features = Features::scan(svg)?;

        let structural = clean(&prepare(svg, false, config)?)?;
        if features.has_opaque {
            return finalize(&structural, config);
        }

        let rebuilt = rebuild(svg, &features, config)?;
        let best = if structural.len() <= rebuilt.len() {
            structural
        } else {
            rebuilt
        };

        finalize(&best, config)
    }
}

/// Run usvg passes until the markup stops changing.
fn rebuild(svg: &str, features: &Features, config: &OptimizeConfig) -> Result<String, OptimizeError> {
    let mut current = single_pass(svg, features, config)?;

    if config.multipass {
        for _ in 1..config.max_passes {
            let next = single_pass(&current, features, config)?;
            if next == current {
                break;
            }
            current = next;
        }
    }

    Ok(current)
}

/// Ensure `xmlns` and strip dimensions, so a previously emitted `1em` never
/// feeds back into sizing.
fn prepare(svg: &str, keep_prolog: bool, config: &OptimizeConfig) -> Result<String, OptimizeError> {
    rewrite_root(svg, keep_prolog, |tag| {
        if !tag.has_attr("xmlns") {
            tag.set_attr("xmlns", SVG_NS);
        }
        if config.remove_dimensions {
            remove_dimensions(tag);
        }
    })
}

/// One usvg round trip followed by cleanup of what the writer restates.
fn single_pass(
    svg: &str,
    features: &Features,
    config: &OptimizeConfig,
) -> Result<String, OptimizeError> {
    let prepared = prepare(svg, true, config)?;

    // `currentColor` resolves against `color`; keep it symbolic unless a
    // `color` attribute pins it.
    let sentinel = if features.has_color_attr {
        None
    } else {
        current_color_sentinel(&prepared)
    };
    let prepared = match sentinel {
        Some(sentinel) => CURRENT_COLOR.replace_all(&prepared, sentinel).into_owned(),
        None => prepared,
    };

    let tree = usvg::Tree::from_data(prepared.as_bytes(), &usvg::Options::default())?;

    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        coordinates_precision: 3,
        transforms_precision: 5,
        ..Default::default()
    };
    let mut written = tree.to_string(&write_options);
    if let Some(sentinel) = sentinel {
        written = written.replace(sentinel, "currentColor");
    }

    let written = rewrite_root(&written, false, |tag| {
        if config.remove_dimensions {
            remove_dimensions(tag);
        }
    })?;
    clean(&written)
}

/// Pick a color absent from `svg` to stand in for `currentColor`, or `None`
/// when the document does not use it.
fn current_color_sentinel(svg: &str) -> Option<&'static str> {
    if !CURRENT_COLOR.is_match(svg) {
        return None;
    }
    let lower = svg.to_ascii_lowercase();
    COLOR_SENTINELS
        .iter()
        .copied()
        .find(|sentinel| !lower.contains(sentinel))
}

/// Apply the post-processing: strip dimensions, then add root attributes.
fn finalize(svg: &str, config: &OptimizeConfig) -> Result<String, OptimizeError> {
    rewrite_root(svg, false, |tag| {
        if config.remove_dimensions {
            remove_dimensions(tag);
        }
        for (key, value) in &config.root_attributes {
            tag.remove_attr(key);
            tag.set_attr(key, value);
        }
    })
}

/// Rewrite the root `<svg>` tag in place.
///
/// Unless `keep_prolog` is set, anything before the root element (XML
/// declaration, doctype, comments) is dropped.
fn rewrite_root<F>(svg: &str, keep_prolog: bool, edit: F) -> Result<String, OptimizeError>
where
    F: FnOnce(&mut SvgTag),
{
    let mut tag = SvgTag::find(svg, Scope::Root)
        .map_err(OptimizeError::Markup)?
        .ok_or(OptimizeError::NotSvg)?;
    let (start, end) = (tag.start, tag.end);

    edit(&mut tag);

    let prolog = if keep_prolog { &svg[..start] } else { "" };
    let body = &svg[end..];
    let body = if keep_prolog { body } else { body.trim_end() };
    Ok(format!("{prolog}{}{body}", tag.render()))
}

/// Remove root `width`/`height`, deriving `viewBox` from them when absent.
fn remove_dimensions(tag: &mut SvgTag) {
    let width = tag.remove_attr("width");
    let height = tag.remove_attr("height");

    if tag.has_attr("viewBox") {
        return;
    }
    if let (Some(w), Some(h)) = (width.as_deref(), height.as_deref())
        && let (Some(w), Some(h)) = (parse_length(w), parse_length(h))
    {
        tag.set_attr("viewBox", &format!("0 0 {w} {h}"));
    }
}

/// Accept plain or `px` user units; relative units cannot size a viewBox.
fn parse_length(value: &str) -> Option<&str> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    match number.parse::<f64>() {
        Ok(n) if n > 0.0 && n.is_finite() => Some(number),
        _ => None,
    }
}
