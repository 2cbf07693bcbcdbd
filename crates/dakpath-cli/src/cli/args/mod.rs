use clap::{Parser, Subcommand};

pub mod common;
pub mod order;
pub mod track;
pub use common::*;
pub use order::*;
pub use track::*;

#[derive(Parser)]
#[command(
    name = "dakpath",
    version,
    about = "Track N Trace demo: validate a consignment and ask a generative model to fabricate its tracking telemetry"
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "DAKPATH_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check an order form without contacting the model
    Validate(ValidateArgs),
    /// Validate an order and fetch a (fabricated) tracking prediction
    Track(TrackArgs),
    Version,
}
