//! Component source generation.
//!
//! Maps an optimized SVG plus a [`Target`] to unformatted source text:
//!
//! - **React**: function component forwarding `props` onto the root `<svg>`
//!   (`.tsx` when typed, `.jsx` otherwise)
//! - **Vue**: single-file-component `<template>` block
//! - **Markup only**: the spliced `<svg>` fragment with no wrapper
//!
//! Whitespace and quoting are left to the formatter.

mod react;
mod vue;

use crate::core::{ComponentIdentifier, Target};
use crate::svg::splice_attribute;

/// Generate component source for `target`. Pure and infallible.
pub fn generate(svg: &str, name: &ComponentIdentifier, target: Target) -> String {
    let markup = splice_attribute(svg, target.framework().spread_marker());

    match target {
        Target::MarkupOnly(_) => markup,
        Target::ReactTyped => react::component(&markup, name, true),
        Target::ReactUntyped => react::component(&markup, name, false),
        Target::Vue => vue::template(&markup),
    }
}
