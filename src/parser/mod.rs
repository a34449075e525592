pub mod correct;
pub mod fields;
pub mod graphics;
pub mod overrides;
pub mod price;
pub mod storage;
pub mod tokenize;

use tracing::{debug, info, warn};

use crate::error::{ExtractError, RowSkip};
use crate::model::{RawRow, Record};

/// A record plus the field-level problems met while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: Record,
    pub warnings: Vec<ExtractError>,
}

/// correct → tokenize → field extractors → price → overrides.
///
/// Field extractors run independently, so a gap in one never blocks the
/// others. A malformed intro or a missing price skips the row.
pub fn extract_detailed(row: &RawRow) -> Result<Extraction, RowSkip> {
    let skip = |cause| RowSkip::new(row.url.as_str(), cause);

    let intro = correct::correct(&row.intro);
    let tokens = tokenize::tokenize(&intro).map_err(skip)?;
    let name = fields::name(&tokens).map_err(skip)?;

    let mut warnings = Vec::new();
    let cpu = field_or_warn(fields::cpu(&tokens), &mut warnings);
    let ram_gb = field_or_warn(fields::ram_gb(&tokens), &mut warnings);
    let storage = tokens
        .get(fields::STORAGE_INDEX)
        .map(|t| storage::parse_storage(t))
        .unwrap_or_default();
    let screen_size_in = fields::screen_size_in(&tokens).map(str::to_string);
    let weight_kg = fields::weight_kg(&tokens).map(str::to_string);
    let gpu = graphics::find_graphics(&tokens);
    warnings.extend(gpu.warnings);

    let price = price::parse_price(&row.price_text).map_err(skip)?;
    warnings.extend(price.warning);

    let record = Record {
        name: name.to_string(),
        brand: fields::brand(name).to_string(),
        cpu,
        ram_gb,
        storage,
        screen_size_in,
        graphics_card: gpu.card,
        weight_kg,
        price_aud: price.aud.to_string(),
        intro: intro.into_owned(),
        url: row.url.clone(),
    };

    Ok(Extraction {
        record: overrides::apply(record),
        warnings,
    })
}

/// Extract one listing, logging any field-level warnings.
pub fn extract(row: &RawRow) -> Result<Record, RowSkip> {
    match extract_detailed(row) {
        Ok(extraction) => {
            for w in &extraction.warnings {
                warn!(name = %extraction.record.name, url = %row.url, "{}", w);
            }
            debug!(name = %extraction.record.name, "extracted");
            Ok(extraction.record)
        }
        Err(skip) => {
            info!(url = %skip.url, reason = %skip.cause, "skipping row");
            Err(skip)
        }
    }
}

fn field_or_warn(
    field: Result<&str, ExtractError>,
    warnings: &mut Vec<ExtractError>,
) -> Option<String> {
    match field {
        Ok(value) => Some(value.to_string()),
        Err(e) => {
            warnings.push(e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GpuBrand, GpuTier, StorageDevice};

    const NITRO: &str = "Acer Nitro 5 AN515-54 Gaming Notebook, Intel Core i5-9300H 2.4GHz, 8GB (1x 8GB) RAM, \
        512GB (2x 256GB SSD) M.2 PCIE SSD + 1TB HDD, 15.6inch FHD IPS, GeForce GTX 1650 4GB, Windows 10 Home, 2.3kg";

    fn row(intro: &str, price: &str) -> RawRow {
        RawRow::new(intro, price, "https://www.scorptec.com.au/product/notebooks/12345")
    }

    #[test]
    fn full_listing() {
        let ex = extract_detailed(&row(NITRO, "\n  $1399.00 \n")).unwrap();
        let r = &ex.record;
        assert_eq!(r.name, "Acer Nitro 5 AN515-54 Gaming Notebook");
        assert_eq!(r.brand, "Acer");
        assert_eq!(r.cpu.as_deref(), Some("Intel Core i5-9300H 2.4GHz"));
        assert_eq!(r.ram_gb.as_deref(), Some("8"));
        assert_eq!(
            r.storage,
            vec![
                StorageDevice { capacity_gb: 512, is_solid_state: true },
                StorageDevice { capacity_gb: 1024, is_solid_state: false },
            ]
        );
        assert_eq!(r.screen_size_in.as_deref(), Some("15.6"));
        assert_eq!(r.weight_kg.as_deref(), Some("2.3"));
        assert_eq!(r.price_aud, "1399.00");
        let gpu = r.graphics_card.as_ref().unwrap();
        assert_eq!(gpu.brand, GpuBrand::GeForce);
        assert_eq!(gpu.tier, Some(GpuTier::Gtx));
        assert_eq!(gpu.display_name, "GeForce GTX1650 (4GB)");
        assert!(ex.warnings.is_empty());
    }

    #[test]
    fn deterministic() {
        let r = row(NITRO, "$1399.00");
        assert_eq!(extract_detailed(&r), extract_detailed(&r));
        let bad = row("\"unterminated", "$10");
        assert_eq!(extract_detailed(&bad), extract_detailed(&bad));
    }

    #[test]
    fn short_intro_is_partial_record() {
        let ex = extract_detailed(&row("Lenovo IdeaPad S145", "$499")).unwrap();
        assert_eq!(ex.record.name, "Lenovo IdeaPad S145");
        assert_eq!(ex.record.cpu, None);
        assert_eq!(ex.record.ram_gb, None);
        assert!(ex.record.storage.is_empty());
        assert_eq!(ex.record.graphics_card, None);
        assert_eq!(
            ex.warnings,
            vec![ExtractError::MissingField("cpu"), ExtractError::MissingField("ram")]
        );
    }

    #[test]
    fn unbalanced_quotes_skip_row() {
        let skip = extract(&row(r#"HP 250 G7, "Intel Core i3, 4GB"#, "$599")).unwrap_err();
        assert!(matches!(skip.cause, ExtractError::MalformedIntro(_)));
        assert_eq!(skip.url, "https://www.scorptec.com.au/product/notebooks/12345");
    }

    #[test]
    fn price_without_digits_skips_row() {
        let skip = extract(&row(NITRO, "Sold out")).unwrap_err();
        assert_eq!(skip.cause, ExtractError::MissingPrice);
        assert_eq!(skip.reason(), "no price found");
    }

    #[test]
    fn corrector_runs_before_tokenizing() {
        let intro = "Dell Latitude 7490 Ultrabook. Intel Core i5-8350U, 8GB, 256GB SSD, 14inch FHD, Intel UHD Graphics 620";
        let r = extract(&row(intro, "$1899")).unwrap();
        assert_eq!(r.name, "Dell Latitude 7490 Ultrabook");
        assert_eq!(r.cpu.as_deref(), Some("Intel Core i5-8350U"));
        // weight comes from the override table
        assert_eq!(r.weight_kg.as_deref(), Some("1.4"));
        assert!(r.intro.starts_with("Dell Latitude 7490 Ultrabook,"));
    }

    #[test]
    fn override_wins_over_heuristics() {
        let intro = "MSI GT75 Titan 9SG Gaming Notebook, Intel Core i9-9980HK, 64GB, 2TB SSD, 17.3inch 4K, GeForce RTX 2080 8GB, 3.9kg";
        let r = extract(&row(intro, "$7999")).unwrap();
        assert_eq!(r.weight_kg.as_deref(), Some("4.56"));
        assert_eq!(r.storage, vec![StorageDevice { capacity_gb: 2048, is_solid_state: true }]);
        assert_eq!(r.graphics_card.unwrap().display_name, "GeForce RTX2080 (8GB)");
    }

    #[test]
    fn comma_in_price_is_flagged() {
        let ex = extract_detailed(&row(NITRO, "$1,399.00")).unwrap();
        assert_eq!(ex.record.price_aud, "1");
        assert!(matches!(ex.warnings.as_slice(), [ExtractError::PriceThousandsSeparator(_)]));
    }
}
