//! Roast CLI library.
//!
//! Argument parsing and the glue that turns a rule directory, a record file
//! and an optional location table into one materialization pass.

pub mod cli;
pub mod run;


pub use cli::Cli;
pub use run::{
    build_geocoder, execute, load_config, load_records, render, write_output, DriverGeocoder,
    StatusChoice,
};
