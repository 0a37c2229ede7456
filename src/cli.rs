//! CLI domain: parse, route, output, and presentation only.
//! No loom logic here; the route table dispatches to the engine.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_check_text, format_loom_text, CheckReport};
pub use route::RunContext;
