/// Contribution amounts are stored as SQLite REAL values.
pub type Amount = f64;

/// Format an amount with two decimals for display.
/// Example: 15.0 -> "15.00", 2.5 -> "2.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse user input into an amount.
///
/// Blank input means "nothing contributed" and yields zero. Anything else
/// must be a finite real number; negative values are accepted as-is.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = input.parse().map_err(|_| ParseAmountError::NotANumber)?;
    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAmountError {
    NotANumber,
    NotFinite,
}

impl std::fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseAmountError::NotANumber => write!(f, "not a number"),
            ParseAmountError::NotFinite => write!(f, "not a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(15.0), "15.00");
        assert_eq!(format_amount(2.5), "2.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234.567), "1234.57");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Ok(10.0));
        assert_eq!(parse_amount(" 12.5 "), Ok(12.5));
        assert_eq!(parse_amount(".5"), Ok(0.5));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(parse_amount(""), Ok(0.0));
        assert_eq!(parse_amount("   "), Ok(0.0));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::NotANumber));
        assert_eq!(parse_amount("12,50"), Err(ParseAmountError::NotANumber));
        assert_eq!(parse_amount("inf"), Err(ParseAmountError::NotFinite));
        assert_eq!(parse_amount("NaN"), Err(ParseAmountError::NotFinite));
    }
}
