//! Core types - pure abstractions shared across the codebase.
//!
//! | Type                  | Role                                        |
//! |-----------------------|---------------------------------------------|
//! | `OptimizeRequest`     | Validated pipeline input                    |
//! | `OptimizeResult`      | Success/failure outcome (wire contract)     |
//! | `ComponentIdentifier` | PascalCase name derived from the file name  |
//! | `Framework`, `Target` | What kind of source to generate             |

mod identifier;
mod request;
mod result;
mod state;
mod target;

pub use identifier::ComponentIdentifier;
pub use request::{DEFAULT_FILE_NAME, OptimizeRequest};
pub use result::{FALLBACK_ERROR, OptimizeResult};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use target::{Framework, Target};
