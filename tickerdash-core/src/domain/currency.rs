//! Currency — display currency codes, symbols, and price formatting.

use crate::domain::Ticker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display currencies the dashboard knows how to render.
///
/// This is a closed set: a provider code outside it is treated as an
/// unavailable currency and the caller falls back to suffix inference.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CNY,
    INR,
    AUD,
    CAD,
    CHF,
    HKD,
    SGD,
    KRW,
    TWD,
    IDR,
    THB,
    BRL,
    MXN,
}

/// Exchange suffix to currency mapping for symbols like `SAP.DE` or `7203.T`.
/// Longest matching suffix wins.
pub const SUFFIX_CURRENCIES: &[(&str, Currency)] = &[
    (".DE", Currency::EUR),
    (".F", Currency::EUR),
    (".PA", Currency::EUR),
    (".AS", Currency::EUR),
    (".MI", Currency::EUR),
    (".MC", Currency::EUR),
    (".L", Currency::GBP),
    (".T", Currency::JPY),
    (".HK", Currency::HKD),
    (".SS", Currency::CNY),
    (".SZ", Currency::CNY),
    (".BO", Currency::INR),
    (".NS", Currency::INR),
    (".AX", Currency::AUD),
    (".KS", Currency::KRW),
    (".TW", Currency::TWD),
    (".SI", Currency::SGD),
    (".JK", Currency::IDR),
    (".BK", Currency::THB),
    (".TO", Currency::CAD),
    (".SA", Currency::BRL),
    (".MX", Currency::MXN),
    (".SW", Currency::CHF),
];

impl Currency {
    pub const ALL: [Currency; 17] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CNY,
        Currency::INR,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::HKD,
        Currency::SGD,
        Currency::KRW,
        Currency::TWD,
        Currency::IDR,
        Currency::THB,
        Currency::BRL,
        Currency::MXN,
    ];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CNY => "CNY",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::HKD => "HKD",
            Currency::SGD => "SGD",
            Currency::KRW => "KRW",
            Currency::TWD => "TWD",
            Currency::IDR => "IDR",
            Currency::THB => "THB",
            Currency::BRL => "BRL",
            Currency::MXN => "MXN",
        }
    }

    /// Display symbol, prefixed to formatted amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{a3}",
            Currency::JPY => "\u{a5}",
            Currency::CNY => "\u{a5}",
            Currency::INR => "\u{20b9}",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::CHF => "\u{20a3}",
            Currency::HKD => "HK$",
            Currency::SGD => "S$",
            Currency::KRW => "\u{20a9}",
            Currency::TWD => "NT$",
            Currency::IDR => "Rp",
            Currency::THB => "\u{e3f}",
            Currency::BRL => "R$",
            Currency::MXN => "MX$",
        }
    }

    /// Fractional digits shown for this currency.
    pub fn decimals(self) -> usize {
        match self {
            Currency::JPY | Currency::KRW | Currency::IDR => 0,
            _ => 2,
        }
    }

    /// Parse an ISO code, case-insensitively. Unknown codes yield None.
    pub fn from_code(code: &str) -> Option<Currency> {
        let code = code.trim();
        Currency::ALL
            .iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .copied()
    }

    /// Infer a currency from the ticker's exchange suffix.
    pub fn from_suffix(ticker: &Ticker) -> Option<Currency> {
        SUFFIX_CURRENCIES
            .iter()
            .filter(|(suffix, _)| ticker.as_str().ends_with(suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, currency)| *currency)
    }

    /// Format an amount with this currency's symbol, thousands grouping,
    /// and decimal convention: `format_price(1234.5, JPY)` is `"¥1,235"`.
    ///
    /// The sign follows the symbol (`$-1,234.50`), matching how the amount
    /// reads when the symbol is simply prefixed to a signed number.
    pub fn format_price(self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}", self.symbol(), amount);
        }
        let decimals = self.decimals();
        // Round half away from zero before formatting; the formatter alone
        // would round ties to even.
        let factor = 10f64.powi(decimals as i32);
        let rounded = (amount * factor).round() / factor;
        let negative = rounded < 0.0;
        let unsigned = format!("{:.*}", decimals, rounded.abs());
        let (int_digits, frac_digits) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned.as_str(), None),
        };
        let mut out = String::with_capacity(unsigned.len() + 8);
        out.push_str(self.symbol());
        if negative {
            out.push('-');
        }
        let digits = int_digits.len();
        for (i, ch) in int_digits.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if let Some(frac) = frac_digits {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
