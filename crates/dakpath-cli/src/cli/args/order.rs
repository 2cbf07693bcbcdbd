use clap::Args;
use dakpath_core::{Language, OrderForm};

use super::OutputFormat;

/// Order form fields. Left empty, they are reported by the validator rather
/// than by clap, so every problem shows up in one pass.
#[derive(Args, Clone, Debug)]
pub struct OrderArgs {
    /// Transport mode: road or rail
    #[arg(long, default_value = "road")]
    pub mode: String,

    /// Registered mobile number (10 digits)
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Order / article id (13 characters, e.g. IP123456789IN)
    #[arg(long, default_value = "")]
    pub order_id: String,

    #[arg(long, default_value = "")]
    pub origin_state: String,

    #[arg(long, default_value = "")]
    pub origin_city: String,

    /// Origin pincode (6 digits, not starting with 0)
    #[arg(long, default_value = "")]
    pub origin_pincode: String,

    #[arg(long, default_value = "")]
    pub dest_state: String,

    #[arg(long, default_value = "")]
    pub dest_city: String,

    /// Destination pincode (6 digits, not starting with 0)
    #[arg(long, default_value = "")]
    pub dest_pincode: String,

    /// Vehicle registration or train number
    #[arg(long)]
    pub tracking_id: Option<String>,

    /// Message language: en, hi or te
    #[arg(long, default_value = "en", env = "DAKPATH_LANG")]
    pub lang: Language,
}

impl OrderArgs {
    pub fn to_form(&self) -> OrderForm {
        OrderForm {
            transport_mode: self.mode.clone(),
            phone_number: self.phone.clone(),
            user_order_id: self.order_id.clone(),
            origin_state: self.origin_state.clone(),
            origin_city: self.origin_city.clone(),
            origin_pincode: self.origin_pincode.clone(),
            dest_state: self.dest_state.clone(),
            dest_city: self.dest_city.clone(),
            dest_pincode: self.dest_pincode.clone(),
            tracking_id: self.tracking_id.clone(),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub order: OrderArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
