use crate::domain::validation::{is_all_digits, strip_non_digits, truncate_chars};
use crate::error::{CieloError, Result};
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const CARD_NUMBER_MIN_LEN: usize = 13;
pub const CARD_NUMBER_MAX_LEN: usize = 19;
pub const HOLDER_NAME_MAX_LEN: usize = 50;

/// Card brands accepted by the acquirer, written as their lowercase codes.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Visa,
    Mastercard,
    Elo,
    Diners,
    Discover,
    Amex,
    Jcb,
    Aura,
}

impl Brand {
    pub const ALL: [Brand; 8] = [
        Brand::Visa,
        Brand::Mastercard,
        Brand::Elo,
        Brand::Diners,
        Brand::Discover,
        Brand::Amex,
        Brand::Jcb,
        Brand::Aura,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Brand::Visa => "visa",
            Brand::Mastercard => "mastercard",
            Brand::Elo => "elo",
            Brand::Diners => "diners",
            Brand::Discover => "discover",
            Brand::Amex => "amex",
            Brand::Jcb => "jcb",
            Brand::Aura => "aura",
        }
    }
}

impl FromStr for Brand {
    type Err = CieloError;

    /// Exact match only: `"VISA"` is not `"visa"`.
    fn from_str(value: &str) -> Result<Self> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.code() == value)
            .ok_or_else(|| CieloError::invalid(format!("Unsupported card brand '{value}'")))
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tells the acquirer whether the security code was sent with the card.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SecurityIndicator {
    NotInformed,
    Informed,
    Unreadable,
    Absent,
}

impl SecurityIndicator {
    pub fn code(&self) -> u8 {
        match self {
            SecurityIndicator::NotInformed => 0,
            SecurityIndicator::Informed => 1,
            SecurityIndicator::Unreadable => 2,
            SecurityIndicator::Absent => 9,
        }
    }
}

impl TryFrom<i64> for SecurityIndicator {
    type Error = CieloError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(SecurityIndicator::NotInformed),
            1 => Ok(SecurityIndicator::Informed),
            2 => Ok(SecurityIndicator::Unreadable),
            9 => Ok(SecurityIndicator::Absent),
            _ => Err(CieloError::invalid(format!(
                "Invalid security code indicator {value}"
            ))),
        }
    }
}

/// A calendar month, used for card expiry and for the "current" reference
/// month it is checked against.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CieloError::invalid(format!("Invalid month {month}")));
        }
        if year > 9999 {
            return Err(CieloError::invalid(format!("Invalid year {year}")));
        }
        Ok(Self { year, month })
    }

    /// Takes the year and month of any chrono date, e.g. `Local::now()`.
    pub fn from_date<D: Datelike>(date: &D) -> Result<Self> {
        let year = u16::try_from(date.year())
            .map_err(|_| CieloError::invalid(format!("Invalid year {}", date.year())))?;
        // chrono months are always 1..=12
        Self::new(year, date.month() as u8)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }
}

impl FromStr for YearMonth {
    type Err = CieloError;

    /// Parses the `YYYYMM` form.
    fn from_str(value: &str) -> Result<Self> {
        if !is_all_digits(value) || value.len() != 6 {
            return Err(CieloError::invalid(format!(
                "Expected a YYYYMM date, got '{value}'"
            )));
        }
        let year = value[..4]
            .parse()
            .map_err(|_| CieloError::invalid(format!("Invalid year in '{value}'")))?;
        let month = value[4..]
            .parse()
            .map_err(|_| CieloError::invalid(format!("Invalid month in '{value}'")))?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Card data for a single authorization attempt.
///
/// Every setter validates its own field and leaves the card untouched when
/// it rejects the value, so setters can be chained with `?`.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Card {
    number: Option<String>,
    brand: Option<Brand>,
    security_indicator: Option<SecurityIndicator>,
    security_code: Option<String>,
    holder_name: Option<String>,
    expiry: Option<YearMonth>,
    token: Option<String>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Stores the digits of `raw`; any other character is discarded first.
    pub fn set_number(&mut self, raw: &str) -> Result<&mut Self> {
        let digits = strip_non_digits(raw);
        if digits.is_empty() {
            return Err(CieloError::invalid("Card number is required"));
        }
        if !(CARD_NUMBER_MIN_LEN..=CARD_NUMBER_MAX_LEN).contains(&digits.len()) {
            return Err(CieloError::invalid(format!(
                "Card number must have between {CARD_NUMBER_MIN_LEN} and {CARD_NUMBER_MAX_LEN} digits, got {}",
                digits.len()
            )));
        }

        self.number = Some(digits);
        Ok(self)
    }

    pub fn brand(&self) -> Option<Brand> {
        self.brand
    }

    pub fn set_brand(&mut self, value: &str) -> Result<&mut Self> {
        self.brand = Some(value.parse()?);
        Ok(self)
    }

    /// Every brand code `set_brand` accepts.
    pub fn brands() -> &'static [Brand] {
        &Brand::ALL
    }

    pub fn security_indicator(&self) -> Option<SecurityIndicator> {
        self.security_indicator
    }

    pub fn set_security_indicator(&mut self, value: i64) -> Result<&mut Self> {
        self.security_indicator = Some(SecurityIndicator::try_from(value)?);
        Ok(self)
    }

    pub fn security_code(&self) -> Option<&str> {
        self.security_code.as_deref()
    }

    /// Accepts anything whose text form is made only of digits, so both
    /// `"123"` and `123` work.
    pub fn set_security_code(&mut self, value: impl fmt::Display) -> Result<&mut Self> {
        let code = value.to_string();
        if !is_all_digits(&code) {
            return Err(CieloError::invalid(
                "Security code must contain only digits",
            ));
        }

        self.security_code = Some(code);
        Ok(self)
    }

    pub fn holder_name(&self) -> Option<&str> {
        self.holder_name.as_deref()
    }

    /// Names longer than 50 characters are cut, not rejected.
    pub fn set_holder_name(&mut self, value: &str) -> Result<&mut Self> {
        if value.trim().is_empty() {
            return Err(CieloError::invalid("Card holder name is required"));
        }

        let name = truncate_chars(value, HOLDER_NAME_MAX_LEN);
        if name.len() < value.len() {
            tracing::debug!(max = HOLDER_NAME_MAX_LEN, "card holder name truncated");
        }
        self.holder_name = Some(name.to_string());
        Ok(self)
    }

    pub fn expiry(&self) -> Option<YearMonth> {
        self.expiry
    }

    /// `expiry` is `YYYYMM`; it may be the current month but not an earlier one.
    pub fn set_expiry(&mut self, expiry: &str, reference: YearMonth) -> Result<&mut Self> {
        let parsed: YearMonth = expiry
            .parse()
            .map_err(|e: CieloError| CieloError::invalid(format!("Invalid card expiry: {e}")))?;
        if parsed < reference {
            return Err(CieloError::invalid(format!(
                "Card expired in {parsed} (reference month {reference})"
            )));
        }

        self.expiry = Some(parsed);
        Ok(self)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, value: impl Into<String>) -> &mut Self {
        self.token = Some(value.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
