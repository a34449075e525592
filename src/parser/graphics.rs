//! Graphics card detection.
//!
//! Each listing reports one GPU. The first intro field starting with a known
//! vendor name is classified into a tier, and its digit runs are read as
//! model number then memory size. Fields that only look like a GPU (a storage
//! line starting "Intel ... SSD", a part number) are rejected and the scan
//! moves on.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;
use crate::model::{GpuBrand, GpuTier, GraphicsCard};

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Memory sizes above this mean the number wasn't a memory size.
pub const MAX_MEMORY_GB: u64 = 32;

/// Most common onboard GPU in the catalog, assumed when Intel gives no number.
pub const DEFAULT_INTEL_MODEL: &str = "620";

const VENDOR_PREFIXES: &[(&str, GpuBrand)] = &[
    ("geforce", GpuBrand::GeForce),
    ("radeon", GpuBrand::Radeon),
    ("intel", GpuBrand::Intel),
];

// Checked in order, first hit wins. "uhd" has to come before "hd".
const TIER_RULES: &[(GpuBrand, &str, GpuTier)] = &[
    (GpuBrand::GeForce, "rtx", GpuTier::Rtx),
    (GpuBrand::GeForce, "gtx", GpuTier::Gtx),
    (GpuBrand::GeForce, "mx", GpuTier::Mx),
    (GpuBrand::Radeon, "rx", GpuTier::Rx),
    (GpuBrand::Radeon, "vega", GpuTier::Vega),
    (GpuBrand::Intel, "uhd", GpuTier::Uhd),
    (GpuBrand::Intel, "hd", GpuTier::Hd),
];

#[derive(Debug, Default)]
pub struct GraphicsScan {
    pub card: Option<GraphicsCard>,
    pub warnings: Vec<ExtractError>,
}

pub fn find_graphics(tokens: &[String]) -> GraphicsScan {
    let mut scan = GraphicsScan::default();
    for token in tokens {
        let lower = token.to_lowercase();
        let Some(brand) = vendor(&lower) else {
            continue;
        };
        if let Some(card) = classify(token, &lower, brand, &mut scan.warnings) {
            scan.card = Some(card);
            break;
        }
    }
    scan
}

fn vendor(lower: &str) -> Option<GpuBrand> {
    VENDOR_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, brand)| *brand)
}

fn tier(lower: &str, brand: GpuBrand) -> Option<GpuTier> {
    TIER_RULES
        .iter()
        .find(|(b, needle, _)| *b == brand && lower.contains(needle))
        .map(|(_, _, tier)| *tier)
        .or_else(|| (brand == GpuBrand::Intel).then_some(GpuTier::Hd))
}

fn classify(
    raw: &str,
    lower: &str,
    brand: GpuBrand,
    warnings: &mut Vec<ExtractError>,
) -> Option<GraphicsCard> {
    if lower.contains("ssd") {
        return None;
    }

    let numbers: Vec<&str> = DIGITS_RE.find_iter(lower).map(|m| m.as_str()).collect();

    let memory_gb = match numbers.get(1) {
        Some(n) => match n.parse::<u64>() {
            Ok(gb) if gb <= MAX_MEMORY_GB => Some(gb as u32),
            _ => return None,
        },
        None => None,
    };

    let model_number = match numbers.first() {
        Some(n) => Some(n.to_string()),
        None if brand == GpuBrand::Intel => Some(DEFAULT_INTEL_MODEL.to_string()),
        None => None,
    };

    let tier = tier(lower, brand);
    if tier.is_none() {
        warnings.push(ExtractError::UnknownGraphicsToken(raw.to_string()));
    }

    let mut card = GraphicsCard {
        brand,
        discrete: brand.is_discrete(),
        raw_text: raw.to_string(),
        tier,
        tier_power: tier.map(|t| t.power()),
        model_number,
        memory_gb,
        display_name: String::new(),
    };
    card.display_name = display_name(&card);
    Some(card)
}

/// "GeForce RTX2060 (6GB)", "Intel HD 620". Falls back to the raw text when
/// no tier was recognised.
pub fn display_name(card: &GraphicsCard) -> String {
    let Some(tier) = card.tier else {
        return card.raw_text.clone();
    };
    let mut name = format!("{} {}", card.brand, tier);
    if card.brand == GpuBrand::Intel {
        name.push(' ');
    }
    if let Some(model) = &card.model_number {
        name.push_str(model);
    }
    if let Some(gb) = card.memory_gb.filter(|gb| *gb > 0) {
        name.push_str(&format!(" ({}GB)", gb));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(fields: &[&str]) -> GraphicsScan {
        let tokens: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        find_graphics(&tokens)
    }

    fn card(fields: &[&str]) -> GraphicsCard {
        scan(fields).card.expect("graphics card")
    }

    #[test]
    fn geforce_rtx_with_memory() {
        let c = card(&["MSI GS65", "i7", "16GB", "512GB SSD", "GeForce RTX 2060 6GB"]);
        assert_eq!(c.brand, GpuBrand::GeForce);
        assert!(c.discrete);
        assert_eq!(c.tier, Some(GpuTier::Rtx));
        assert_eq!(c.tier_power, Some(4));
        assert_eq!(c.model_number.as_deref(), Some("2060"));
        assert_eq!(c.memory_gb, Some(6));
        assert_eq!(c.display_name, "GeForce RTX2060 (6GB)");
    }

    #[test]
    fn intel_without_number_defaults_to_620() {
        let c = card(&["Lenovo V130", "Intel HD Graphics"]);
        assert!(!c.discrete);
        assert_eq!(c.tier, Some(GpuTier::Hd));
        assert_eq!(c.model_number.as_deref(), Some("620"));
        assert_eq!(c.display_name, "Intel HD 620");
    }

    #[test]
    fn uhd_beats_hd() {
        let c = card(&["Toshiba Portege", "Intel UHD Graphics 620"]);
        assert_eq!(c.tier, Some(GpuTier::Uhd));
        assert_eq!(c.tier_power, Some(1));
        assert_eq!(c.display_name, "Intel UHD 620");
    }

    #[test]
    fn bare_intel_is_hd() {
        let c = card(&["HP Stream", "Intel Iris Plus Graphics"]);
        assert_eq!(c.tier, Some(GpuTier::Hd));
        assert_eq!(c.tier_power, Some(0));
    }

    #[test]
    fn first_vendor_field_wins() {
        let c = card(&["X", "GeForce GTX 1050 4GB", "Radeon RX 560 4GB"]);
        assert_eq!(c.brand, GpuBrand::GeForce);
    }

    #[test]
    fn cpu_field_part_number_is_not_memory() {
        // "Intel Core i5-8250U" reads as model 5 with 8250GB memory
        let c = card(&["Acer Aspire 5", "Intel Core i5-8250U", "8GB", "GeForce MX150 2GB"]);
        assert_eq!(c.brand, GpuBrand::GeForce);
        assert_eq!(c.tier, Some(GpuTier::Mx));
        assert_eq!(c.display_name, "GeForce MX150 (2GB)");
    }

    #[test]
    fn radeon_tiers() {
        let c = card(&["HP Envy", "Radeon RX 560X 4GB"]);
        assert_eq!(c.tier, Some(GpuTier::Rx));
        assert_eq!(c.display_name, "Radeon RX560 (4GB)");
        let c = card(&["HP Envy", "Radeon Vega 8"]);
        assert_eq!(c.tier, Some(GpuTier::Vega));
        assert_eq!(c.memory_gb, None);
        assert_eq!(c.display_name, "Radeon Vega8");
    }

    #[test]
    fn zero_memory_is_not_shown() {
        let c = card(&["X", "GeForce GTX 1050 0GB"]);
        assert_eq!(c.memory_gb, Some(0));
        assert_eq!(c.display_name, "GeForce GTX1050");
    }

    #[test]
    fn unknown_tier_keeps_raw_text() {
        let s = scan(&["X", "GeForce Titan 12GB"]);
        let c = s.card.expect("graphics card");
        assert_eq!(c.tier, None);
        assert_eq!(c.tier_power, None);
        assert_eq!(c.display_name, "GeForce Titan 12GB");
        assert_eq!(
            s.warnings,
            vec![ExtractError::UnknownGraphicsToken("GeForce Titan 12GB".into())]
        );
    }

    #[test]
    fn ssd_field_is_rejected() {
        let s = scan(&["X", "Intel 660p 512GB SSD"]);
        assert!(s.card.is_none());
        let s = scan(&["X", "Intel Optane SSD"]);
        assert!(s.card.is_none());
    }

    #[test]
    fn oversized_memory_is_rejected() {
        assert!(scan(&["X", "Intel Core i7-8750H 2.2GHz 64GB"]).card.is_none());
        assert!(scan(&["X", "GeForce 1 99999999999999999999999"]).card.is_none());
    }

    #[test]
    fn scan_continues_after_rejection() {
        let c = card(&["X", "Intel 512GB SSD", "GeForce GTX 1060 6GB"]);
        assert_eq!(c.brand, GpuBrand::GeForce);
        assert_eq!(c.display_name, "GeForce GTX1060 (6GB)");
    }

    #[test]
    fn no_vendor_no_card() {
        let s = scan(&["Apple MacBook", "Apple M1", "8GB"]);
        assert!(s.card.is_none());
        assert!(s.warnings.is_empty());
    }
}
