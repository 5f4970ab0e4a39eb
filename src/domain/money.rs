use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift in totals.
/// For PHP, 1 peso = 100 centavos, so ₱50,000.00 = 5_000_000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount with thousands separators.
/// Example: 5000000 -> "50,000.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!(
        "{}{}.{:02}",
        sign,
        group_thousands(abs_cents / 100),
        abs_cents % 100
    )
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse user-entered text into a non-negative amount in cents.
///
/// Accepts whole units ("500"), one or two decimals ("12.5", "12.50") and
/// thousands separators ("50,000.00"). Digits past the second decimal are
/// truncated. Negative, empty or non-numeric input is rejected here so the
/// ledger only ever sees well-formed amounts.
pub fn parse_amount(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCentsError::Empty);
    }
    if input.starts_with('-') {
        return Err(ParseCentsError::Negative);
    }

    let cleaned: String = input.chars().filter(|c| *c != ',').collect();
    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    let fraction_cents: i64 = match fraction.len() {
        0 => 0,
        // "5" means 50 cents
        1 => fraction.parse::<i64>().map_err(|_| ParseCentsError::InvalidFormat)? * 10,
        _ => fraction[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction_cents))
        .ok_or(ParseCentsError::Overflow)
}

fn is_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    Empty,
    Negative,
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::Empty => write!(f, "amount is required"),
            ParseCentsError::Negative => write!(f, "amount cannot be negative"),
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
