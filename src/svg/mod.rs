//! SVG processing.
//!
//! # Modules
//!
//! - [`optimize`]: candidate selection and root-element post-processing
//! - [`minify`]: structural cleanup of rendering-neutral markup
//! - [`root`]: structural location and rewriting of the root `<svg>` tag
//!
//! # Flow
//!
//! ```text
//! raw SVG
//!    │
//!    ├──────────────────────────┐
//!    ▼                          ▼
//! ┌──────────────┐        ┌─────────────┐
//! │ single_pass  │ ◄─┐    │ clean       │ structural candidate
//! └──────┬───────┘   │    └──────┬──────┘ (only one for text/foreignObject)
//!        └─ changed? ┘           │
//!        │ rebuilt candidate     │
//!        └──────────┬────────────┘
//!                   ▼ shorter wins, ties keep structural
//!             ┌──────────┐
//!             │ finalize │ ──► strip width/height, append width="1em" height="1em"
//!             └──────────┘
//! ```

mod minify;
mod optimize;
mod root;

pub use optimize::{OptimizeConfig, OptimizeError, SvgOptimizer, UsvgOptimizer};
pub use root::splice_attribute;
