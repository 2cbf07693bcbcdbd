//! User-facing message catalogue (English, Hindi, Telugu).
//!
//! Only the strings the core surfaces live here: inline validation messages
//! and the generic tracking-failure banner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Te => "te",
        }
    }

    /// English name, used in prompts.
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Te => "Telugu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            "te" => Ok(Self::Te),
            other => Err(format!("unsupported language: {other:?} (expected en, hi or te)")),
        }
    }
}

/// Catalogue keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    InvalidPincode,
    InvalidPhone,
    InvalidOrderId,
    InvalidTransportMode,
    Required,
    TrackingFailed,
}

/// Look up a message in the given language.
pub fn message(key: Message, lang: Language) -> &'static str {
    use Language::*;
    use Message::*;

    match (key, lang) {
        (InvalidPincode, En) => "Enter a valid 6-digit pincode (it cannot start with 0).",
        (InvalidPincode, Hi) => "कृपया मान्य 6 अंकों का पिनकोड दर्ज करें (यह 0 से शुरू नहीं हो सकता)।",
        (InvalidPincode, Te) => "దయచేసి సరైన 6 అంకెల పిన్‌కోడ్‌ను నమోదు చేయండి (ఇది 0తో ప్రారంభం కాకూడదు).",

        (InvalidPhone, En) => "Mobile number must be exactly 10 digits.",
        (InvalidPhone, Hi) => "मोबाइल नंबर ठीक 10 अंकों का होना चाहिए।",
        (InvalidPhone, Te) => "మొబైల్ నంబర్ సరిగ్గా 10 అంకెలు ఉండాలి.",

        (InvalidOrderId, En) => "Order ID must be exactly 13 characters (e.g. IP123456789IN).",
        (InvalidOrderId, Hi) => "ऑर्डर आईडी ठीक 13 अक्षरों की होनी चाहिए (जैसे IP123456789IN)।",
        (InvalidOrderId, Te) => "ఆర్డర్ ఐడీ సరిగ్గా 13 అక్షరాలు ఉండాలి (ఉదా. IP123456789IN).",

        (InvalidTransportMode, En) => "Select a transport mode: road or rail.",
        (InvalidTransportMode, Hi) => "परिवहन का तरीका चुनें: सड़क या रेल।",
        (InvalidTransportMode, Te) => "రవాణా విధానాన్ని ఎంచుకోండి: రోడ్డు లేదా రైలు.",

        (Required, En) => "This field is required.",
        (Required, Hi) => "यह फ़ील्ड आवश्यक है।",
        (Required, Te) => "ఈ ఫీల్డ్ తప్పనిసరి.",

        (TrackingFailed, En) => {
            "Unable to track consignment. Please check the tracking ID and origin details."
        }
        (TrackingFailed, Hi) => {
            "कंसाइनमेंट ट्रैक करने में असमर्थ। कृपया ट्रैकिंग आईडी और मूल विवरण जांचें।"
        }
        (TrackingFailed, Te) => {
            "కన్సైన్‌మెంట్‌ను ట్రాక్ చేయలేకపోయాము. దయచేసి ట్రాకింగ్ ఐడీ మరియు మూల వివరాలను తనిఖీ చేయండి."
        }
    }
}
