//! Display currency conversion and formatting.
//!
//! AED is the canonical currency; INR and USD are derived with fixed
//! courtesy multipliers. This is a display convenience, not a financial-
//! grade FX lookup - the rates are intentionally static so a re-rendered
//! quotation always shows the same figures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::calculators::round_money;

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Aed,
    Inr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// Currency glyph for on-screen use. The document formatter never uses
    /// these; page-drawing primitives only get ASCII.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Inr => "\u{20b9}",
            Currency::Usd => "$",
        }
    }

    fn decimal_places(&self) -> u32 {
        match self {
            Currency::Aed | Currency::Inr => 0,
            Currency::Usd => 2,
        }
    }

    /// Convert an amount from canonical AED into this currency.
    pub fn from_aed(&self, amount: Decimal) -> Decimal {
        match self {
            Currency::Aed => amount,
            Currency::Inr => amount * dec!(25.5),
            Currency::Usd => amount / dec!(3.65),
        }
    }
}

/// Format an AED-canonical amount for the document: ASCII currency code
/// prefix, converted value, currency-appropriate grouping and precision.
/// Zero (or negative-degraded) amounts render as `<CODE> 0`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    if amount.is_zero() {
        return format!("{} 0", currency.code());
    }
    format!("{} {}", currency.code(), render_value(amount, currency))
}

/// On-screen variant of `format_amount` using currency glyphs.
pub fn format_amount_symbol(amount: Decimal, currency: Currency) -> String {
    if amount.is_zero() {
        return format!("{} 0", currency.symbol());
    }
    format!("{} {}", currency.symbol(), render_value(amount, currency))
}

fn render_value(amount: Decimal, currency: Currency) -> String {
    let converted = round_money(currency.from_aed(amount), currency.decimal_places());
    let negative = converted.is_sign_negative();
    let text = converted.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let grouped = match currency {
        Currency::Inr => group_indian(&int_part),
        Currency::Aed | Currency::Usd => group_western(&int_part),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if currency.decimal_places() > 0 {
        let frac = frac_part.unwrap_or_default();
        out.push('.');
        out.push_str(&frac);
        for _ in frac.len()..currency.decimal_places() as usize {
            out.push('0');
        }
    }
    out
}

/// Thousands grouping: 1,234,567
fn group_western(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Lakh/crore grouping: 12,34,567
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(len - 3);
    let mut out = String::new();
    let head_len = head.len();
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}
