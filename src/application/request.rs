use crate::domain::card::{Brand, Card};
use crate::domain::language::Language;
use crate::domain::transaction::{ProductType, TIMESTAMP_FORMAT, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw request as it arrives from the outside, every field still text.
///
/// Columns left out or empty stay `None`, and the matching field keeps its
/// default. Any `card_*`, `brand`, `holder`, `expiry` or `token` column makes
/// the request carry a card.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct RequestRecord {
    pub tid: Option<String>,
    pub product: Option<String>,
    pub installments: Option<String>,
    pub currency: Option<String>,
    pub capture: Option<String>,
    pub authorization: Option<String>,
    pub timestamp: Option<String>,
    pub order: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub tokenize: Option<String>,
    pub card_number: Option<String>,
    pub brand: Option<String>,
    pub security_indicator: Option<String>,
    pub security_code: Option<String>,
    pub holder: Option<String>,
    pub expiry: Option<String>,
    pub token: Option<String>,
}

impl RequestRecord {
    pub fn has_card(&self) -> bool {
        [
            &self.card_number,
            &self.brand,
            &self.security_indicator,
            &self.security_code,
            &self.holder,
            &self.expiry,
            &self.token,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

/// A fully validated request, ready for the submission client.
#[derive(Debug, PartialEq, Clone)]
pub struct AuthorizationRequest {
    transaction: Transaction,
    card: Option<Card>,
    language: Language,
}

impl AuthorizationRequest {
    pub fn new(transaction: Transaction, card: Option<Card>, language: Language) -> Self {
        Self {
            transaction,
            card,
            language,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Read-only view of the request. Never contains the security code, and
    /// the card number is masked.
    pub fn summary(&self) -> RequestSummary {
        let tx = &self.transaction;
        let card = self.card.as_ref();

        RequestSummary {
            tid: tx.tid().map(str::to_string),
            product: tx.product_type(),
            installments: tx.installments(),
            currency: tx.currency(),
            amount: tx.amount_in_major_units(),
            capture: tx.auto_capture(),
            authorization: tx.authorization_indicator().code(),
            order: tx.order_number(),
            timestamp: tx
                .timestamp()
                .map(|at| at.format(TIMESTAMP_FORMAT).to_string()),
            description: tx.description().to_string(),
            tokenize: tx.tokenize(),
            brand: card.and_then(Card::brand),
            card: card.and_then(Card::number).map(mask_card_number),
            holder: card.and_then(Card::holder_name).map(str::to_string),
            expiry: card.and_then(Card::expiry).map(|e| e.to_string()),
            security_indicator: card
                .and_then(Card::security_indicator)
                .map(|indicator| indicator.code()),
            token: card.is_some_and(Card::has_token),
            language: self.language,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct RequestSummary {
    pub tid: Option<String>,
    pub product: ProductType,
    pub installments: u32,
    pub currency: u32,
    pub amount: Decimal,
    pub capture: bool,
    pub authorization: u8,
    pub order: Option<u64>,
    pub timestamp: Option<String>,
    pub description: String,
    pub tokenize: bool,
    pub brand: Option<Brand>,
    pub card: Option<String>,
    pub holder: Option<String>,
    pub expiry: Option<String>,
    pub security_indicator: Option<u8>,
    pub token: bool,
    pub language: Language,
}

/// Keeps the first six and last four digits.
fn mask_card_number(number: &str) -> String {
    let len = number.len();
    if len <= 10 {
        return "*".repeat(len);
    }
    format!("{}{}{}", &number[..6], "*".repeat(len - 10), &number[len - 4..])
}
