//! React function component.
//!
//! ```tsx
//! import * as React from "react"
//! import type { SVGProps } from "react"
//!
//! const Bell = (props: SVGProps<SVGSVGElement>) => (
//!   <svg ... {...props}>...</svg>
//! )
//!
//! export default Bell
//! ```

use crate::core::ComponentIdentifier;

const REACT_IMPORT: &str = "import * as React from \"react\"\n";
const PROPS_TYPE_IMPORT: &str = "import type { SVGProps } from \"react\"\n";

/// `markup` must already carry the `{...props}` spread.
pub fn component(markup: &str, name: &ComponentIdentifier, typed: bool) -> String {
    let mut code = String::with_capacity(markup.len() + 256);

    code.push_str(REACT_IMPORT);
    if typed {
        code.push_str(PROPS_TYPE_IMPORT);
    }
    code.push('\n');

    code.push_str("const ");
    code.push_str(name.as_str());
    code.push_str(if typed {
        " = (props: SVGProps<SVGSVGElement>) => (\n"
    } else {
        " = (props) => (\n"
    });
    code.push_str("  ");
    code.push_str(markup);
    code.push_str("\n)\n\n");

    code.push_str("export default ");
    code.push_str(name.as_str());
    code.push('\n');
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_layout() {
        let name = ComponentIdentifier::from_file_name("bell");
        let code = component("<svg {...props}/>", &name, true);
        assert_eq!(
            code,
            "import * as React from \"react\"\n\
             import type { SVGProps } from \"react\"\n\
             \n\
             const Bell = (props: SVGProps<SVGSVGElement>) => (\n  <svg {...props}/>\n)\n\
             \n\
             export default Bell\n"
        );
    }

    #[test]
    fn test_untyped_layout() {
        let name = ComponentIdentifier::from_file_name("bell");
        let code = component("<svg {...props}/>", &name, false);
        assert_eq!(
            code,
            "import * as React from \"react\"\n\
             \n\
             const Bell = (props) => (\n  <svg {...props}/>\n)\n\
             \n\
             export default Bell\n"
        );
    }
}
