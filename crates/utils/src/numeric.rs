//! Numeric parsing of heterogeneous cell values.
//!
//! Table cells arrive as numbers, numeric-looking strings ("1,234.50",
//! "$12", "(300)", "15%") or free text. Anything that does not read as a
//! finite number is reported as not-a-number.

use lazy_static::lazy_static;
use regex::Regex;
use tablecheck_core::CellValue;

lazy_static! {
    // Unsigned decimal with optional comma thousands separators.
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d*)?|\.\d+)$").unwrap();
}

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];
const UNICODE_MINUS: char = '\u{2212}';

/// Parser for a single cell value.
#[derive(Debug, Clone, Copy)]
pub struct NumericParser<'a> {
    value: &'a CellValue,
}

impl<'a> NumericParser<'a> {
    pub fn new(value: &'a CellValue) -> Self {
        Self { value }
    }

    /// Parse the cell, returning `None` when it is not a number.
    pub fn parse(&self) -> Option<f64> {
        match self.value {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_finite() => Some(*f),
            CellValue::String(s) => parse_numeric_str(s),
            CellValue::Float(_) | CellValue::Bool(_) | CellValue::Null => None,
        }
    }

    /// Parse the cell, returning `f64::NAN` when it is not a number.
    pub fn parse_numeric(&self) -> f64 {
        self.parse().unwrap_or(f64::NAN)
    }
}

/// Parse a cell value into a float.
pub fn parse_numeric(value: &CellValue) -> Option<f64> {
    NumericParser::new(value).parse()
}

/// Parse numeric-looking text.
pub fn parse_numeric_str(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(UNICODE_MINUS, "-");
    let mut negative = false;

    // Accounting style negatives: (1,234)
    let mut body = normalized.as_str();
    if let Some(inner) = body.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        negative = true;
        body = inner.trim();
    }

    body = body.trim_end_matches('%').trim_end();

    // Sign may sit on either side of a currency symbol: -$5 or $-5
    let (sign_negative, rest) = split_sign(body);
    negative |= sign_negative;
    let rest = rest.trim().trim_matches(CURRENCY_SYMBOLS).trim();
    let (sign_negative, digits) = split_sign(rest);
    negative |= sign_negative;

    if !NUMBER_PATTERN.is_match(digits) {
        return None;
    }

    let value: f64 = digits.replace(',', "").parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}
