use std::sync::LazyLock;

use regex::Regex;

use crate::model::StorageDevice;
use crate::parser::fields::first_number;

// Per-module breakdowns like "(2x 256GB SSD)" would read as extra drives.
static PARENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

const GB_PER_TB: f64 = 1024.0;

enum Scan {
    AwaitingSize,
    AwaitingType(u32),
}

/// Parse the storage field into drives, left to right.
///
/// A size word ("512GB", "1TB") is paired with the next drive type word
/// ("SSD", "HDD", "SSHD"). Words in between are ignored, and a size with no
/// type before the end of the field is dropped.
pub fn parse_storage(field: &str) -> Vec<StorageDevice> {
    let cleaned = PARENS_RE.replace_all(field, "");
    let mut devices = Vec::new();
    let mut state = Scan::AwaitingSize;

    for word in cleaned.split_whitespace() {
        state = match state {
            Scan::AwaitingSize => match size_gb(word) {
                Some(gb) => Scan::AwaitingType(gb),
                None => Scan::AwaitingSize,
            },
            Scan::AwaitingType(gb) => match word {
                "SSD" | "HDD" | "SSHD" => {
                    devices.push(StorageDevice {
                        capacity_gb: gb,
                        is_solid_state: word == "SSD",
                    });
                    Scan::AwaitingSize
                }
                _ => Scan::AwaitingType(gb),
            },
        };
    }

    devices
}

fn size_gb(word: &str) -> Option<u32> {
    let scale = if word.ends_with("TB") {
        GB_PER_TB
    } else if word.ends_with("GB") {
        1.0
    } else {
        return None;
    };
    let value: f64 = first_number(word)?.parse().ok()?;
    Some((value * scale).round() as u32)
}
