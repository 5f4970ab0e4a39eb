//! Boundary helpers: turn raw user text into the typed values the ledger
//! expects. The ledger itself performs no validation.

use chrono::NaiveDate;

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}

/// Mask a card number down to its last four digits.
/// Non-digits are ignored; four digits or fewer are returned unchanged.
///
/// "4111 1111 1111 1234" -> "****-****-****-1234"
/// "12345678"            -> "****-5678"
pub fn mask_card_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return digits;
    }

    let last_four = &digits[digits.len() - 4..];
    let hidden_groups = match digits.len() {
        5..=8 => 1,
        9..=12 => 2,
        _ => 3,
    };
    format!("{}{}", "****-".repeat(hidden_groups), last_four)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
        );
        assert!(parse_date("03/01/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111 1111 1111 1234"), "****-****-****-1234");
        assert_eq!(mask_card_number("4111-1111-1111-1111-999"), "****-****-****-1999");
        assert_eq!(mask_card_number("123456789"), "****-****-6789");
        assert_eq!(mask_card_number("12345678"), "****-5678");
        assert_eq!(mask_card_number("1234"), "1234");
        assert_eq!(mask_card_number("ab"), "");
    }
}
