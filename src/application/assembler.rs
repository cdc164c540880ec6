use crate::application::request::{AuthorizationRequest, RequestRecord};
use crate::domain::card::{Card, YearMonth};
use crate::domain::language::Language;
use crate::domain::transaction::{TIMESTAMP_FORMAT, Transaction};
use crate::domain::validation::is_all_digits;
use crate::error::{CieloError, Result};
use chrono::NaiveDateTime;

/// Turns raw request records into validated [`AuthorizationRequest`]s.
///
/// Fields are applied one by one through the model setters and the first
/// rejected field aborts the record; the error message is prefixed with the
/// field name.
pub struct RequestAssembler {
    reference: YearMonth,
    language: Language,
}

impl RequestAssembler {
    /// # Arguments
    ///
    /// * `reference` - The "current" month card expiry is checked against.
    /// * `language` - Language attached to every assembled request.
    pub fn new(reference: YearMonth, language: Language) -> Self {
        Self {
            reference,
            language,
        }
    }

    pub fn reference(&self) -> YearMonth {
        self.reference
    }

    pub fn assemble(&self, record: &RequestRecord) -> Result<AuthorizationRequest> {
        let transaction = self.build_transaction(record)?;
        let card = if record.has_card() {
            Some(self.build_card(record)?)
        } else {
            None
        };

        tracing::debug!(tid = ?transaction.tid(), has_card = card.is_some(), "request assembled");
        Ok(AuthorizationRequest::new(transaction, card, self.language))
    }

    fn build_transaction(&self, record: &RequestRecord) -> Result<Transaction> {
        let mut tx = Transaction::new();

        if let Some(tid) = &record.tid {
            tx.set_tid(tid).map_err(in_field("tid"))?;
        }
        if let Some(product) = &record.product {
            tx.set_product_type(product).map_err(in_field("product"))?;
        }
        if let Some(installments) = &record.installments {
            tx.set_installments(installments)
                .map_err(in_field("installments"))?;
        }
        if let Some(currency) = &record.currency {
            tx.set_currency(currency).map_err(in_field("currency"))?;
        }
        if let Some(capture) = &record.capture {
            tx.set_auto_capture(parse_flag(capture).map_err(in_field("capture"))?);
        }
        if let Some(authorization) = &record.authorization {
            let code = parse_integer(authorization).map_err(in_field("authorization"))?;
            tx.set_authorization_indicator(code)
                .map_err(in_field("authorization"))?;
        }
        if let Some(timestamp) = &record.timestamp {
            let at = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
                CieloError::invalid(format!("timestamp: '{timestamp}' is not a date-time ({e})"))
            })?;
            tx.set_timestamp(at);
        }
        if let Some(order) = &record.order {
            let number = parse_unsigned(order).map_err(in_field("order"))?;
            tx.set_order_number(number).map_err(in_field("order"))?;
        }
        if let Some(amount) = &record.amount {
            tx.set_amount(parse_unsigned(amount).map_err(in_field("amount"))?);
        }
        if let Some(description) = &record.description {
            tx.set_description(description.as_str());
        }
        if let Some(tokenize) = &record.tokenize {
            tx.set_tokenize(parse_flag(tokenize).map_err(in_field("tokenize"))?);
        }

        Ok(tx)
    }

    fn build_card(&self, record: &RequestRecord) -> Result<Card> {
        let mut card = Card::new();

        if let Some(number) = &record.card_number {
            card.set_number(number).map_err(in_field("card_number"))?;
        }
        if let Some(brand) = &record.brand {
            card.set_brand(brand).map_err(in_field("brand"))?;
        }
        if let Some(indicator) = &record.security_indicator {
            let code = parse_integer(indicator).map_err(in_field("security_indicator"))?;
            card.set_security_indicator(code)
                .map_err(in_field("security_indicator"))?;
        }
        if let Some(code) = &record.security_code {
            card.set_security_code(code)
                .map_err(in_field("security_code"))?;
        }
        if let Some(holder) = &record.holder {
            card.set_holder_name(holder).map_err(in_field("holder"))?;
        }
        if let Some(expiry) = &record.expiry {
            card.set_expiry(expiry, self.reference)
                .map_err(in_field("expiry"))?;
        }
        if let Some(token) = &record.token {
            card.set_token(token.as_str());
        }

        Ok(card)
    }
}

fn in_field(field: &'static str) -> impl FnOnce(CieloError) -> CieloError {
    move |err| match err {
        CieloError::InvalidInput(message) => CieloError::InvalidInput(format!("{field}: {message}")),
        other => other,
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(CieloError::invalid(format!("'{value}' is not a boolean"))),
    }
}

fn parse_integer(value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| CieloError::invalid(format!("'{value}' is not an integer")))
}

fn parse_unsigned(value: &str) -> Result<u64> {
    if !is_all_digits(value) {
        return Err(CieloError::invalid(format!("'{value}' is not a whole number")));
    }
    value
        .parse()
        .map_err(|_| CieloError::invalid(format!("'{value}' is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Brand;
    use crate::domain::transaction::{AuthorizationIndicator, ProductType};

    fn assembler() -> RequestAssembler {
        RequestAssembler::new("201302".parse().unwrap(), Language::Portuguese)
    }

    fn full_record() -> RequestRecord {
        RequestRecord {
            tid: Some("10017348980735271001".to_string()),
            product: Some("2".to_string()),
            installments: Some("3".to_string()),
            currency: Some("986".to_string()),
            capture: Some("true".to_string()),
            authorization: Some("3".to_string()),
            timestamp: Some("2013-02-17T14:05:09".to_string()),
            order: Some("178148599".to_string()),
            amount: Some("1237".to_string()),
            description: Some("Compra de teste".to_string()),
            tokenize: Some("0".to_string()),
            card_number: Some("4923 9938 2795 1627".to_string()),
            brand: Some("visa".to_string()),
            security_indicator: Some("1".to_string()),
            security_code: Some("123".to_string()),
            holder: Some("Thiago Paes".to_string()),
            expiry: Some("201606".to_string()),
            token: None,
        }
    }

    #[test]
    fn test_assemble_full_record() {
        let request = assembler().assemble(&full_record()).unwrap();
        let tx = request.transaction();
        assert_eq!(tx.tid(), Some("10017348980735271001"));
        assert_eq!(tx.product_type(), ProductType::StoreInstallments);
        assert_eq!(tx.installments(), 3);
        assert!(tx.auto_capture());
        assert_eq!(
            tx.authorization_indicator(),
            AuthorizationIndicator::WithoutAuthentication
        );
        assert_eq!(tx.order_number(), Some(178148599));
        assert_eq!(tx.amount(), 1237);
        assert!(!tx.tokenize());

        let card = request.card().unwrap();
        assert_eq!(card.number(), Some("4923993827951627"));
        assert_eq!(card.brand(), Some(Brand::Visa));
        assert_eq!(card.expiry().unwrap().to_string(), "201606");
        assert_eq!(request.language(), Language::Portuguese);
    }

    #[test]
    fn test_assemble_without_card() {
        let record = RequestRecord {
            tid: Some("abc123".to_string()),
            amount: Some("100".to_string()),
            ..Default::default()
        };
        let request = assembler().assemble(&record).unwrap();
        assert!(request.card().is_none());
        assert_eq!(request.transaction().currency(), 986);
    }

    #[test]
    fn test_error_names_the_field() {
        let mut record = full_record();
        record.expiry = Some("201210".to_string());
        let err = assembler().assemble(&record).unwrap_err();
        assert!(err.to_string().contains("expiry:"), "{err}");

        let mut record = full_record();
        record.brand = Some("MASTERCARD".to_string());
        let err = assembler().assemble(&record).unwrap_err();
        assert!(err.to_string().contains("brand:"), "{err}");

        let mut record = full_record();
        record.security_indicator = Some("d".to_string());
        let err = assembler().assemble(&record).unwrap_err();
        assert!(err.to_string().contains("security_indicator:"), "{err}");
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut record = full_record();
        record.timestamp = Some("17/02/2013".to_string());
        assert!(matches!(
            assembler().assemble(&record),
            Err(CieloError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("yes").is_err());
    }

    #[test]
    fn test_parse_unsigned_rejects_signs() {
        assert_eq!(parse_unsigned("42").unwrap(), 42);
        assert!(parse_unsigned("-42").is_err());
        assert!(parse_unsigned("+42").is_err());
        assert!(parse_unsigned("99999999999999999999999").is_err());
    }
}
