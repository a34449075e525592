use std::mem::take;

use crate::error::ExtractError;

/// Split an intro into trimmed comma-separated fields.
///
/// A double quote opening a field (leading whitespace aside) protects embedded
/// commas until the closing quote, and `""` inside it is a literal quote.
/// Quotes anywhere else are plain text, so `13.3"` survives as an inch mark.
/// A quote that is never closed makes the whole intro malformed.
pub fn tokenize(intro: &str) -> Result<Vec<String>, ExtractError> {
    if intro.trim().is_empty() {
        return Err(ExtractError::MalformedIntro("empty intro".into()));
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = intro.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ExtractError::MalformedIntro("unbalanced quotes".into()));
    }
    fields.push(field);

    Ok(fields.into_iter().map(|f| f.trim().to_string()).collect())
}
