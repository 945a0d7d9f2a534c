use crate::error::Error;

/// suffix of securities listed on the Taiwan Stock Exchange
pub const TW_SUFFIX: &str = ".TW";

/// Normalize user input into an exchange-qualified ticker.
///
/// Surrounding whitespace is trimmed, letters are uppercased and `.TW` is
/// appended unless already present, so `2330`, ` 2330.tw ` and `2330.TW`
/// all become `2330.TW`.
pub fn normalize_ticker(input: &str) -> Result<String, Error> {
    let clean = input.trim().to_uppercase();
    if clean.is_empty() {
        return Err(Error::Client("empty ticker".to_owned()));
    }
    if clean.ends_with(TW_SUFFIX) {
        Ok(clean)
    } else {
        Ok(format!("{}{}", clean, TW_SUFFIX))
    }
}
