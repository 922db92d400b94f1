use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static CARD_TYPES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("VISA", r"^4\d{12}(\d{3})?(\d{3})?$"),
        ("MASTERCARD", r"^(5[1-5]\d{4}|222[1-9]\d{2}|22[3-9]\d{3}|2[3-6]\d{4}|27[01]\d{3}|2720\d{2})\d{10}$"),
        ("AMEX", r"^3[47]\d{13}$"),
        ("DISCOVER", r"^6(011|5\d{2})\d{12}$"),
        ("DINERS", r"^3(0[0-5]|[68]\d)\d{11}$"),
        ("JCB", r"^(?:2131|1800|35\d{3})\d{11}$"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid card pattern")))
    .collect()
});

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Card brand as the ordering API names it, or an empty string when unknown.
pub fn card_type(number: &str) -> &'static str {
    CARD_TYPES
        .iter()
        .find(|(_, re)| re.is_match(number))
        .map(|(name, _)| *name)
        .unwrap_or("")
}

/// Card details typed on the command line, before amounts are known.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDetails {
    pub number: String,
    pub expiration: String,
    pub security_code: String,
    pub postal_code: String,
    pub tip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(rename = "Type")]
    pub payment_type: String,
    pub amount: f64,
    pub number: String,
    pub card_type: String,
    pub expiration: String,
    pub security_code: String,
    pub postal_code: String,
    pub tip_amount: f64,
}

impl Payment {
    pub fn credit_card(amount: f64, card: &CardDetails) -> Self {
        let number = digits_only(&card.number);
        Self {
            payment_type: "CreditCard".to_string(),
            amount,
            card_type: card_type(&number).to_string(),
            number,
            expiration: digits_only(&card.expiration),
            security_code: card.security_code.clone(),
            postal_code: card.postal_code.clone(),
            tip_amount: card.tip,
        }
    }
}
