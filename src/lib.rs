//! Turns scraped laptop listings (an intro line and a price string) into
//! structured product records.

pub mod db;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod settings;
pub mod sink;
pub mod source;

pub use error::{ExtractError, RowSkip};
pub use model::{GpuBrand, GpuTier, GraphicsCard, RawRow, Record, StorageDevice};
pub use parser::{extract, extract_detailed, Extraction};
