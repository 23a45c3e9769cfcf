//! Configuration section definitions.
//!
//! Each module corresponds to a section in `revector.toml`:
//!
//! | Module     | TOML Section   | Purpose                               |
//! |------------|----------------|---------------------------------------|
//! | `generate` | `[generate]`   | Default framework, variant, name      |
//! | `serve`    | `[serve]`      | HTTP endpoint interface and port      |

mod generate;
mod serve;

pub use generate::GenerateConfig;
pub use serve::ServeConfig;
