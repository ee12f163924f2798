use crate::domain::model::{PaymentForm, PaymentInfo};
use crate::utils::error::{PluginError, Result};
use crate::utils::validation::is_digits;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// Card-type labels offered at checkout. Informational only; the number is
/// never checked against the issuer prefix.
pub const CREDIT_CARD_TYPES: [&str; 4] = ["Visa", "MasterCard", "Discover", "Amex"];

const CARD_NUMBER_LEN: std::ops::RangeInclusive<usize> = 12..=19;
const CARD_CODE_LEN: std::ops::RangeInclusive<usize> = 3..=4;
/// How many years ahead of the reference year the expiry dropdown offers.
const EXPIRE_YEAR_SPAN: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    RequiredFieldMissing,
    InvalidFormat,
    Expired,
}

/// One validation finding, tied to the form field it was raised for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIssue {
    pub field: &'static str,
    pub kind: IssueKind,
    pub message: String,
}

impl FormIssue {
    fn new(field: &'static str, kind: IssueKind, message: &str) -> Self {
        Self {
            field,
            kind,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validates a submitted card form against today's date (UTC).
pub fn validate_payment_form(form: &PaymentForm) -> Vec<FormIssue> {
    validate_payment_form_at(form, Utc::now().date_naive())
}

/// Single pass over the five fields; short-circuits inside a field, keeps
/// accumulating across fields so the user sees every problem at once.
/// Never fails — findings are data, not errors.
pub fn validate_payment_form_at(form: &PaymentForm, today: NaiveDate) -> Vec<FormIssue> {
    let mut issues = Vec::new();

    if form.cardholder_name.trim().is_empty() {
        issues.push(FormIssue::new(
            "CardholderName",
            IssueKind::RequiredFieldMissing,
            "Cardholder name is required.",
        ));
    }

    let number = form.card_number.trim();
    if number.is_empty() {
        issues.push(FormIssue::new(
            "CardNumber",
            IssueKind::RequiredFieldMissing,
            "Card number is required.",
        ));
    } else if !is_digits(number) || !CARD_NUMBER_LEN.contains(&number.len()) {
        issues.push(FormIssue::new(
            "CardNumber",
            IssueKind::InvalidFormat,
            "Card number is invalid.",
        ));
    }

    let code = form.card_code.trim();
    if code.is_empty() {
        issues.push(FormIssue::new(
            "CardCode",
            IssueKind::RequiredFieldMissing,
            "Card verification code is required.",
        ));
    } else if !is_digits(code) || !CARD_CODE_LEN.contains(&code.len()) {
        issues.push(FormIssue::new(
            "CardCode",
            IssueKind::InvalidFormat,
            "Card verification code is invalid.",
        ));
    }

    let month = form
        .expire_month
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m));
    if month.is_none() {
        issues.push(FormIssue::new(
            "ExpireMonth",
            IssueKind::InvalidFormat,
            "Expiration month is invalid.",
        ));
    }

    match form.expire_year.trim().parse::<i32>() {
        Err(_) => {
            issues.push(FormIssue::new(
                "ExpireYear",
                IssueKind::InvalidFormat,
                "Expiration year is invalid.",
            ));
        }
        Ok(year) => {
            // 只有月份有效時才能組出到期日來比較
            if let Some(month) = month {
                if (year, month) < (today.year(), today.month()) {
                    issues.push(FormIssue::new(
                        "ExpireYear",
                        IssueKind::Expired,
                        "The card has expired.",
                    ));
                }
            }
        }
    }

    issues
}

/// Typed extraction for the payment-processing collaborator. Callers are
/// expected to run validation first; a non-numeric month or year here is
/// reported as a payment-data error, not a panic.
pub fn payment_info(form: &PaymentForm) -> Result<PaymentInfo> {
    let expire_month =
        form.expire_month
            .trim()
            .parse::<u32>()
            .map_err(|_| PluginError::PaymentDataError {
                message: format!("expiration month is not numeric: '{}'", form.expire_month),
            })?;
    let expire_year =
        form.expire_year
            .trim()
            .parse::<i32>()
            .map_err(|_| PluginError::PaymentDataError {
                message: format!("expiration year is not numeric: '{}'", form.expire_year),
            })?;

    Ok(PaymentInfo {
        credit_card_type: form.credit_card_type.clone(),
        credit_card_name: form.cardholder_name.clone(),
        credit_card_number: form.card_number.clone(),
        credit_card_expire_month: expire_month,
        credit_card_expire_year: expire_year,
        credit_card_cvv2: form.card_code.clone(),
    })
}

/// Redacted one-line summary for confirmation pages and logs:
/// `"Visa, Jane Doe, ************1111"`. One-way; never exposes the number.
pub fn payment_summary(form: &PaymentForm) -> String {
    format!(
        "{}, {}, {}",
        form.credit_card_type,
        form.cardholder_name,
        mask(&form.card_number, 4)
    )
}

fn mask(value: &str, visible_tail: usize) -> String {
    let len = value.chars().count();
    if len <= visible_tail {
        return value.to_string();
    }
    let tail: String = value.chars().skip(len - visible_tail).collect();
    let mut masked = "*".repeat(len - visible_tail);
    masked.push_str(&tail);
    masked
}

/// Postback model for the checkout payment-info form: selectable card types,
/// month/year options, and the echoed field values.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInfoView {
    pub credit_card_types: Vec<String>,
    pub expire_months: Vec<String>,
    pub expire_years: Vec<String>,
    pub form: PaymentForm,
}

pub fn payment_info_view(form: &PaymentForm, from_year: i32) -> PaymentInfoView {
    PaymentInfoView {
        credit_card_types: CREDIT_CARD_TYPES.iter().map(|t| t.to_string()).collect(),
        expire_months: expire_month_options(),
        expire_years: expire_year_options(from_year),
        form: form.clone(),
    }
}

pub fn expire_month_options() -> Vec<String> {
    (1..=12).map(|m| format!("{:02}", m)).collect()
}

pub fn expire_year_options(from_year: i32) -> Vec<String> {
    (0..EXPIRE_YEAR_SPAN)
        .map(|i| (from_year + i).to_string())
        .collect()
}
