//! Vue single-file-component template.

/// Wrap `markup` in a `<template>` block. No script, no identifier.
pub fn template(markup: &str) -> String {
    let mut code = String::with_capacity(markup.len() + 32);
    code.push_str("<template>\n  ");
    code.push_str(markup);
    code.push_str("\n</template>\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_wraps_markup() {
        assert_eq!(template("<svg/>"), "<template>\n  <svg/>\n</template>\n");
    }
}
