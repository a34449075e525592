use thiserror::Error;

/// Everything that can go wrong while extracting a listing.
///
/// `MalformedIntro`, `MissingPrice` and `UnreadableRow` cost the whole row. The rest are
/// field-level and only leave a gap in the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("malformed intro: {0}")]
    MalformedIntro(String),
    #[error("no {0} found in intro")]
    MissingField(&'static str),
    #[error("no price found")]
    MissingPrice,
    #[error("unknown graphics card model: {0}")]
    UnknownGraphicsToken(String),
    #[error("unreadable input row: {0}")]
    UnreadableRow(String),
    #[error("price text contains a thousands separator, first number taken: {0:?}")]
    PriceThousandsSeparator(String),
}

impl ExtractError {
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::MalformedIntro(_) | Self::MissingPrice | Self::UnreadableRow(_)
        )
    }
}

/// A row dropped from the batch. Never affects other rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping row {url:?}: {cause}")]
pub struct RowSkip {
    pub url: String,
    #[source]
    pub cause: ExtractError,
}

impl RowSkip {
    pub fn new(url: impl Into<String>, cause: ExtractError) -> Self {
        RowSkip {
            url: url.into(),
            cause,
        }
    }

    pub fn reason(&self) -> String {
        self.cause.to_string()
    }
}
