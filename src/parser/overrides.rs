//! Hand-checked corrections for listings whose intro is missing or garbles a
//! field. Keyed by exact product name, applied after every extractor has run.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::{GpuBrand, GpuTier, GraphicsCard, Record, StorageDevice};

#[derive(Debug, Clone, Copy)]
pub struct GpuPatch {
    pub brand: GpuBrand,
    pub raw_text: &'static str,
    pub tier: GpuTier,
    pub tier_power: u8,
    pub model_number: &'static str,
    pub display_name: &'static str,
}

impl GpuPatch {
    fn to_card(self) -> GraphicsCard {
        GraphicsCard {
            brand: self.brand,
            discrete: self.brand.is_discrete(),
            raw_text: self.raw_text.to_string(),
            tier: Some(self.tier),
            tier_power: Some(self.tier_power),
            model_number: Some(self.model_number.to_string()),
            memory_gb: None,
            display_name: self.display_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Override {
    pub name: &'static str,
    pub graphics_card: Option<GpuPatch>,
    pub weight_kg: Option<&'static str>,
    pub storage: Option<&'static [StorageDevice]>,
}

impl Override {
    /// Names of the record fields this entry replaces.
    pub fn patched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.graphics_card.is_some() {
            fields.push("graphics_card");
        }
        if self.weight_kg.is_some() {
            fields.push("weight_kg");
        }
        if self.storage.is_some() {
            fields.push("storage");
        }
        fields
    }

    fn patch(&self, record: &mut Record) {
        if let Some(gpu) = self.graphics_card {
            record.graphics_card = Some(gpu.to_card());
        }
        if let Some(kg) = self.weight_kg {
            record.weight_kg = Some(kg.to_string());
        }
        if let Some(devices) = self.storage {
            record.storage = devices.to_vec();
        }
    }
}

const fn weight(name: &'static str, kg: &'static str) -> Override {
    Override {
        name,
        graphics_card: None,
        weight_kg: Some(kg),
        storage: None,
    }
}

const fn gpu(name: &'static str, patch: GpuPatch) -> Override {
    Override {
        name,
        graphics_card: Some(patch),
        weight_kg: None,
        storage: None,
    }
}

pub static OVERRIDES: &[Override] = &[
    // Notebooks
    gpu(
        "Lenovo IdeaPad V130 Iron Grey Notebook",
        GpuPatch {
            brand: GpuBrand::Intel,
            raw_text: "Intel HD Graphics 620",
            tier: GpuTier::Hd,
            tier_power: 0,
            model_number: "620",
            display_name: "Intel HD 620",
        },
    ),
    weight("Acer Spin 5 2-in-1 Notebook", "1.6"),
    weight("Dell Latitude 3590 Notebook", "2.02"),
    Override {
        name: "HP ProBook 645 G4 Notebook",
        graphics_card: None,
        weight_kg: None,
        storage: Some(&[StorageDevice {
            capacity_gb: 256,
            is_solid_state: true,
        }]),
    },
    // Gaming notebooks
    weight("Acer Nitro Gaming Notebook", "2.3"),
    weight("Acer Predator Helios G3 Gaming Notebook", "2.56"),
    weight("Aorus 15-W9 Gaming Notebook", "2.4"),
    weight("Aorus 15-X9 Gaming Notebook", "2.4"),
    weight("ASUS TUF FX505GE Gaming Notebook", "2.2"),
    weight("ASUS ROG Zephyrus GX531GM Gaming Notebook", "2.1"),
    weight("MSI GS65 Stealth Black Gaming Notebook", "1.9"),
    weight("MSI GS75 8SE Stealth Gaming Notebook", "2.25"),
    weight("MSI GS75 8SF Stealth Gaming Notebook", "2.25"),
    weight("MSI GS65 Stealth 9SE Gaming Notebook", "1.9"),
    weight("MSI GE75 Raider Black Gaming Notebook", "2.64"),
    weight("MSI GE75 Raider Gaming Notebook", "2.61"),
    weight("MSI GE75 Raider 9SE Gaming Notebook", "2.64"),
    weight("MSI GE63 Raider Black Gaming Notebook", "2.6"),
    weight("MSI GT75 8SG Titan Black Gaming Notebook", "4.56"),
    weight("MSI GT75 8SF Black Gaming Notebook", "4.56"),
    weight("MSI P65 9SE Gaming Notebook", "1.9"),
    weight("MSI P65 9SF Gaming Notebook", "1.9"),
    weight("MSI P65 Creator 9SE Gaming Notebook", "1.9"),
    weight("MSI P75-9SF Gaming Notebook", "2.25"),
    // Ultrabooks
    gpu(
        "Toshiba Portege X20W Ultrabook",
        GpuPatch {
            brand: GpuBrand::Intel,
            raw_text: "Intel UHD Graphics 620",
            tier: GpuTier::Uhd,
            tier_power: 0,
            model_number: "620",
            display_name: "Intel UHD 620",
        },
    ),
    weight("Acer Swift 5 Ultrabook", "0.97"),
    weight("Lenovo ThinkPad X1 Yoga Gen 3 Ultrabook", "1.4"),
    weight("Dell Latitude 7490 Ultrabook", "1.4"),
    weight("MSI GE75 Raider 9SF Gaming Notebook", "2.64"),
    weight("MSI GL63 8SD Gaming Notebook", "2.3"),
    weight("MSI GL63 8SC Gaming Notebook", "2.3"),
    weight("MSI GS65 Stealth 9SF Gaming Notebook", "1.9"),
    weight("MSI GS65 Stealth 9SG Gaming Notebook", "1.9"),
    weight("MSI GS75 9SG Gaming Notebook", "2.28"),
    weight("MSI GS75 Stealth 9SE Gaming Notebook", "2.28"),
    weight("MSI GT75 Titan 9SF Gaming Notebook", "4.56"),
    weight("MSI GT75 Titan 9SG Gaming Notebook", "4.56"),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static Override>> =
    LazyLock::new(|| OVERRIDES.iter().map(|o| (o.name, o)).collect());

pub fn lookup(name: &str) -> Option<&'static Override> {
    BY_NAME.get(name).copied()
}

/// Patch `record` from the table. Names are matched exactly, case included;
/// unknown names pass through untouched.
pub fn apply(mut record: Record) -> Record {
    if let Some(entry) = lookup(&record.name) {
        entry.patch(&mut record);
    }
    record
}
