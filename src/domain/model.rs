use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat field-name → value mapping as submitted by an HTML form.
pub type FormData = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierService {
    /// Stable numeric identifier as the carrier publishes it ("03", "12", ...).
    pub id: String,
    pub name: String,
}

impl CarrierService {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Ordered list of known carrier services. Read-only during a codec call.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<CarrierService>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<CarrierService>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[CarrierService] {
        &self.services
    }

    pub fn names(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }

    /// 依顯示名稱查 ID,查不到回 None (呼叫端自行決定要不要忽略)
    pub fn service_id(&self, name: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub name: String,
}

/// Raw card-payment form fields, exactly as submitted (no parsing yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub cardholder_name: String,
    pub card_number: String,
    pub card_code: String,
    pub credit_card_type: String,
    pub expire_month: String,
    pub expire_year: String,
}

impl PaymentForm {
    /// Recognized form keys: CardholderName, CardNumber, CardCode,
    /// CreditCardType, ExpireMonth, ExpireYear. Missing keys become "".
    pub fn from_form(form: &FormData) -> Self {
        let field = |key: &str| form.get(key).cloned().unwrap_or_default();
        Self {
            cardholder_name: field("CardholderName"),
            card_number: field("CardNumber"),
            card_code: field("CardCode"),
            credit_card_type: field("CreditCardType"),
            expire_month: field("ExpireMonth"),
            expire_year: field("ExpireYear"),
        }
    }

    /// 從 JSON dump 讀入表單 (check_payment_form CLI 用)
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let form: FormData = serde_json::from_str(payload)?;
        Ok(Self::from_form(&form))
    }
}

/// Typed payment data handed to the payment-processing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub credit_card_type: String,
    pub credit_card_name: String,
    pub credit_card_number: String,
    pub credit_card_expire_month: u32,
    pub credit_card_expire_year: i32,
    pub credit_card_cvv2: String,
}
