//! Settings are read from a TOML file and layered with environment variables.
//! See `bin/settings_demo.rs` for a binary printing the resolved settings.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
