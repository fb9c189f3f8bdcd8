use serde::{Deserialize, Serialize};

/// Packaged offer presented on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Silver, Tier::Gold, Tier::Platinum];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "silver" | "good" => Some(Self::Silver),
            "gold" | "better" => Some(Self::Gold),
            "platinum" | "best" => Some(Self::Platinum),
            _ => None,
        }
    }

    pub fn profile(self) -> &'static TierProfile {
        match self {
            Tier::Silver => &SILVER,
            Tier::Gold => &GOLD,
            Tier::Platinum => &PLATINUM,
        }
    }
}

/// Static marketing details for a tier; nothing here depends on the quote.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProfile {
    pub name: &'static str,
    pub tagline: &'static str,
    pub efficiency: &'static str,
    pub warranty: &'static str,
    pub features: &'static [&'static str],
    pub recommended: bool,
}

static SILVER: TierProfile = TierProfile {
    name: "Silver Comfort",
    tagline: "Reliable performance on a budget",
    efficiency: "14 SEER2",
    warranty: "10-Year Parts",
    features: &[
        "Single-Stage Compressor",
        "Standard Sound Levels",
        "Standard Air Filtration",
        "Smart Thermostat Compatible",
    ],
    recommended: false,
};

static GOLD: TierProfile = TierProfile {
    name: "Gold Efficiency",
    tagline: "Perfect balance of comfort & savings",
    efficiency: "16 SEER2",
    warranty: "10-Year Parts + 2-Year Labor",
    features: &[
        "Two-Stage Compressor (Even Temps)",
        "Quiet Operation Technology",
        "Enhanced Humidity Control",
        "Wi-Fi Smart Thermostat Included",
    ],
    recommended: true,
};

static PLATINUM: TierProfile = TierProfile {
    name: "Platinum Elite",
    tagline: "Ultimate precision and silence",
    efficiency: "20+ SEER2",
    warranty: "Lifetime Unit Replacement",
    features: &[
        "Variable Speed Compressor (Inverter)",
        "Whisper-Quiet Operation",
        "Perfect Humidity & Air Quality",
        "Communicating Smart Zoning Ready",
    ],
    recommended: false,
};
