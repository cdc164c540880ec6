use crate::domain::validation::{is_all_digits, is_alphanumeric, is_at_least, truncate_chars};
use crate::error::{CieloError, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const MIN_INSTALLMENTS: u32 = 1;
pub const DEFAULT_CURRENCY: u32 = 986;
pub const ORDER_NUMBER_MAX_LEN: usize = 50;

/// Wire format of the order timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Kind of purchase, sent as the product code.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum ProductType {
    #[default]
    #[serde(rename = "1")]
    CreditCash,
    #[serde(rename = "2")]
    StoreInstallments,
    #[serde(rename = "3")]
    IssuerInstallments,
    #[serde(rename = "A")]
    Debit,
}

impl ProductType {
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::CreditCash => "1",
            ProductType::StoreInstallments => "2",
            ProductType::IssuerInstallments => "3",
            ProductType::Debit => "A",
        }
    }
}

impl FromStr for ProductType {
    type Err = CieloError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "1" => Ok(ProductType::CreditCash),
            "2" => Ok(ProductType::StoreInstallments),
            "3" => Ok(ProductType::IssuerInstallments),
            "A" => Ok(ProductType::Debit),
            _ => Err(CieloError::invalid(format!(
                "Invalid product type '{value}'"
            ))),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Under which authentication outcome the acquirer may authorize.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum AuthorizationIndicator {
    #[default]
    DoNotAuthorize,
    AuthenticatedOnly,
    AuthenticatedOrNot,
    /// Skips authentication entirely. Credit only.
    WithoutAuthentication,
}

impl AuthorizationIndicator {
    pub fn code(&self) -> u8 {
        match self {
            AuthorizationIndicator::DoNotAuthorize => 0,
            AuthorizationIndicator::AuthenticatedOnly => 1,
            AuthorizationIndicator::AuthenticatedOrNot => 2,
            AuthorizationIndicator::WithoutAuthentication => 3,
        }
    }
}

impl TryFrom<i64> for AuthorizationIndicator {
    type Error = CieloError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(AuthorizationIndicator::DoNotAuthorize),
            1 => Ok(AuthorizationIndicator::AuthenticatedOnly),
            2 => Ok(AuthorizationIndicator::AuthenticatedOrNot),
            3 => Ok(AuthorizationIndicator::WithoutAuthentication),
            _ => Err(CieloError::invalid(format!(
                "Invalid authorization indicator {value}"
            ))),
        }
    }
}

/// Order-level parameters of one authorization request.
#[derive(Debug, PartialEq, Clone)]
pub struct Transaction {
    tid: Option<String>,
    product_type: ProductType,
    installments: u32,
    currency: u32,
    auto_capture: bool,
    authorization_indicator: AuthorizationIndicator,
    timestamp: Option<NaiveDateTime>,
    order_number: Option<u64>,
    amount: u64,
    description: String,
    tokenize: bool,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            tid: None,
            product_type: ProductType::default(),
            installments: MIN_INSTALLMENTS,
            currency: DEFAULT_CURRENCY,
            auto_capture: false,
            authorization_indicator: AuthorizationIndicator::default(),
            timestamp: None,
            order_number: None,
            amount: 0,
            description: String::new(),
            tokenize: false,
        }
    }

    pub fn tid(&self) -> Option<&str> {
        self.tid.as_deref()
    }

    pub fn set_tid(&mut self, tid: &str) -> Result<&mut Self> {
        if !is_alphanumeric(tid) {
            return Err(CieloError::invalid("Invalid characters in TID"));
        }

        self.tid = Some(tid.to_string());
        Ok(self)
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn set_product_type(&mut self, value: &str) -> Result<&mut Self> {
        self.product_type = value.parse()?;
        Ok(self)
    }

    pub fn installments(&self) -> u32 {
        self.installments
    }

    pub fn set_installments(&mut self, count: impl fmt::Display) -> Result<&mut Self> {
        let text = count.to_string();
        let parsed = is_all_digits(&text)
            .then(|| text.parse::<u32>().ok())
            .flatten()
            .filter(|n| is_at_least(*n, MIN_INSTALLMENTS))
            .ok_or_else(|| CieloError::invalid(format!("Invalid installment count '{text}'")))?;

        self.installments = parsed;
        Ok(self)
    }

    /// ISO 4217 numeric code.
    pub fn currency(&self) -> u32 {
        self.currency
    }

    /// Only digit-ness is checked; the code is not looked up in ISO 4217.
    pub fn set_currency(&mut self, code: impl fmt::Display) -> Result<&mut Self> {
        let text = code.to_string();
        let parsed = is_all_digits(&text)
            .then(|| text.parse::<u32>().ok())
            .flatten()
            .ok_or_else(|| CieloError::invalid(format!("Invalid currency '{text}'")))?;

        self.currency = parsed;
        Ok(self)
    }

    pub fn auto_capture(&self) -> bool {
        self.auto_capture
    }

    pub fn set_auto_capture(&mut self, capture: bool) -> &mut Self {
        self.auto_capture = capture;
        self
    }

    pub fn authorization_indicator(&self) -> AuthorizationIndicator {
        self.authorization_indicator
    }

    pub fn set_authorization_indicator(&mut self, value: i64) -> Result<&mut Self> {
        self.authorization_indicator = AuthorizationIndicator::try_from(value)?;
        Ok(self)
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) -> &mut Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn order_number(&self) -> Option<u64> {
        self.order_number
    }

    /// The number goes through its decimal text, cut to 50 characters, and
    /// back. A `u64` never reaches that length so the cut never bites here.
    pub fn set_order_number(&mut self, number: u64) -> Result<&mut Self> {
        let text = number.to_string();
        let parsed = truncate_chars(&text, ORDER_NUMBER_MAX_LEN)
            .parse()
            .map_err(|_| CieloError::invalid(format!("Invalid order number {number}")))?;

        self.order_number = Some(parsed);
        Ok(self)
    }

    /// Amount in minor units: 1237 is 12.37.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn amount_in_major_units(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.amount), 2)
    }

    pub fn set_amount(&mut self, amount: u64) -> &mut Self {
        self.amount = amount;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Whether the acquirer should return a reusable token for the card.
    pub fn tokenize(&self) -> bool {
        self.tokenize
    }

    pub fn set_tokenize(&mut self, tokenize: bool) -> &mut Self {
        self.tokenize = tokenize;
        self
    }
}
