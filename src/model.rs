use std::fmt;

use serde::{Deserialize, Serialize};

/// One listing as handed over by the crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub intro: String,
    #[serde(default, alias = "price")]
    pub price_text: String,
    #[serde(default)]
    pub url: String,
}

impl RawRow {
    pub fn new(intro: impl Into<String>, price_text: impl Into<String>, url: impl Into<String>) -> Self {
        RawRow {
            intro: intro.into(),
            price_text: price_text.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDevice {
    pub capacity_gb: u32,
    pub is_solid_state: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuBrand {
    GeForce,
    Radeon,
    Intel,
}

impl GpuBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeForce => "GeForce",
            Self::Radeon => "Radeon",
            Self::Intel => "Intel",
        }
    }

    /// Anything that isn't Intel onboard graphics is a dedicated card.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::Intel)
    }
}

impl fmt::Display for GpuBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse performance bucket of a GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuTier {
    #[serde(rename = "RTX")]
    Rtx,
    #[serde(rename = "GTX")]
    Gtx,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "RX")]
    Rx,
    Vega,
    #[serde(rename = "UHD")]
    Uhd,
    #[serde(rename = "HD")]
    Hd,
}

impl GpuTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rtx => "RTX",
            Self::Gtx => "GTX",
            Self::Mx => "MX",
            Self::Rx => "RX",
            Self::Vega => "Vega",
            Self::Uhd => "UHD",
            Self::Hd => "HD",
        }
    }

    pub fn power(&self) -> u8 {
        match self {
            Self::Rtx => 4,
            Self::Gtx => 3,
            Self::Mx | Self::Rx => 2,
            Self::Uhd => 1,
            Self::Vega | Self::Hd => 0,
        }
    }
}

impl fmt::Display for GpuTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicsCard {
    pub brand: GpuBrand,
    pub discrete: bool,
    pub raw_text: String,
    pub tier: Option<GpuTier>,
    pub tier_power: Option<u8>,
    pub model_number: Option<String>,
    pub memory_gb: Option<u32>,
    pub display_name: String,
}

/// Structured product record extracted from a single listing.
///
/// `name` is the key the override table matches on and is never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub brand: String,
    pub cpu: Option<String>,
    pub ram_gb: Option<String>,
    pub storage: Vec<StorageDevice>,
    pub screen_size_in: Option<String>,
    pub graphics_card: Option<GraphicsCard>,
    pub weight_kg: Option<String>,
    pub price_aud: String,
    pub intro: String,
    pub url: String,
}
