use clap::Args;

use super::{OrderArgs, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct TrackArgs {
    #[command(flatten)]
    pub order: OrderArgs,

    /// Latitude hint for maps grounding (rail)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude hint for maps grounding (rail)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// API key for the generative API
    #[arg(long, env = "DAKPATH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "DAKPATH_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "DAKPATH_TIMEOUT")]
    pub timeout: Option<u64>,
}
