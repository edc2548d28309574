use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::inquiry::NewInquiry;

/// One violation in a submitted form. 400 responses carry the full list so
/// the client can show every problem at once.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Raw booking submission. Every field is optional at the wire level so a
/// single pass can report all missing/invalid fields together.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub event_location: Option<String>,
    pub guest_count: Option<i32>,
    pub package_id: Option<i32>,
    pub total_amount: Option<String>,
    pub special_requests: Option<String>,
    pub budget_range: Option<String>,
    pub is_custom_package: Option<bool>,
}

/// A booking submission that passed validation.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub event_location: Option<String>,
    pub guest_count: i32,
    pub package_id: Option<i32>,
    pub total_amount: Option<String>,
    pub special_requests: Option<String>,
    pub budget_range: Option<String>,
    pub is_custom_package: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryForm {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub event_type: Option<String>,
    pub guest_count: Option<i32>,
    pub budget_range: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub fn validate_booking(form: BookingForm) -> Result<BookingRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let full_name = require_text(form.full_name, "fullName", &mut errors);
    let email = require_email(form.email, "email", &mut errors);
    let phone = require_text(form.phone, "phone", &mut errors);
    let event_type = require_text(form.event_type, "eventType", &mut errors);
    let event_date = require_date(form.event_date, "eventDate", &mut errors);
    let event_time = require_text(form.event_time, "eventTime", &mut errors);
    let guest_count = require_guest_count(form.guest_count, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(BookingRequest {
        full_name,
        email,
        phone,
        event_type,
        event_date,
        event_time,
        event_location: form.event_location,
        guest_count,
        package_id: form.package_id,
        total_amount: form.total_amount,
        special_requests: form.special_requests,
        budget_range: form.budget_range,
        is_custom_package: form.is_custom_package.unwrap_or(false),
    })
}

pub fn validate_inquiry(form: InquiryForm) -> Result<NewInquiry, Vec<FieldError>> {
    let mut errors = Vec::new();

    let client_name = require_text(form.client_name, "clientName", &mut errors);
    let client_email = require_email(form.client_email, "clientEmail", &mut errors);
    let event_type = require_text(form.event_type, "eventType", &mut errors);
    let guest_count = require_guest_count(form.guest_count, &mut errors);
    let budget_range = require_text(form.budget_range, "budgetRange", &mut errors);
    let message = require_text(form.message, "message", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewInquiry {
        client_name,
        client_email,
        client_phone: form.client_phone,
        event_type,
        guest_count,
        budget_range,
        message,
    })
}

pub fn validate_contact(form: ContactForm) -> Result<ContactRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = require_text(form.name, "name", &mut errors);
    let email = require_email(form.email, "email", &mut errors);
    let subject = require_text(form.subject, "subject", &mut errors);
    let message = require_text(form.message, "message", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactRequest {
        name,
        email,
        subject,
        message,
    })
}

/// Minimal shape check (local@domain.tld), not full RFC 5322.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

// The helpers return placeholder values after recording an error; callers
// bail out before the placeholders can escape.

fn require_text(value: Option<String>, field: &'static str, errors: &mut Vec<FieldError>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, "is required"));
            String::new()
        }
    }
}

fn require_email(
    value: Option<String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> String {
    match value {
        Some(v) if is_valid_email(&v) => v,
        Some(_) => {
            errors.push(FieldError::new(field, "must be a valid email address"));
            String::new()
        }
        None => {
            errors.push(FieldError::new(field, "is required"));
            String::new()
        }
    }
}

fn require_date(
    value: Option<NaiveDate>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> NaiveDate {
    match value {
        Some(v) => v,
        None => {
            errors.push(FieldError::new(field, "is required"));
            NaiveDate::default()
        }
    }
}

fn require_guest_count(value: Option<i32>, errors: &mut Vec<FieldError>) -> i32 {
    match value {
        Some(n) if n >= 1 => n,
        Some(_) => {
            errors.push(FieldError::new("guestCount", "must be at least 1"));
            0
        }
        None => {
            errors.push(FieldError::new("guestCount", "is required"));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_booking_form() -> BookingForm {
        BookingForm {
            full_name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            event_type: Some("wedding".to_string()),
            event_date: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            event_time: Some("18:00".to_string()),
            guest_count: Some(50),
            package_id: Some(2),
            ..BookingForm::default()
        }
    }

    #[test]
    fn valid_booking_form_passes() {
        let request = validate_booking(full_booking_form()).expect("form is valid");
        assert_eq!(request.email, "jane@example.com");
        assert_eq!(request.guest_count, 50);
        assert!(!request.is_custom_package);
    }

    #[test]
    fn empty_form_reports_every_missing_field() {
        let errors = validate_booking(BookingForm::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "fullName",
                "email",
                "phone",
                "eventType",
                "eventDate",
                "eventTime",
                "guestCount"
            ]
        );
    }

    #[test]
    fn zero_guests_is_rejected() {
        let form = BookingForm {
            guest_count: Some(0),
            ..full_booking_form()
        };
        let errors = validate_booking(form).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("guestCount", "must be at least 1")]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["janeexample.com", "@example.com", "jane@", "jane@nodot", "jane @x.com"] {
            let form = BookingForm {
                email: Some(bad.to_string()),
                ..full_booking_form()
            };
            assert!(validate_booking(form).is_err(), "{bad} should be rejected");
        }
        assert!(is_valid_email("jane@example.com"));
    }

    #[test]
    fn inquiry_form_requires_budget_and_message() {
        let form = InquiryForm {
            client_name: Some("Jane Doe".to_string()),
            client_email: Some("jane@example.com".to_string()),
            event_type: Some("corporate".to_string()),
            guest_count: Some(30),
            ..InquiryForm::default()
        };
        let errors = validate_inquiry(form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["budgetRange", "message"]);
    }

    #[test]
    fn contact_form_validates_all_fields() {
        let form = ContactForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            subject: Some("Tasting menu".to_string()),
            message: Some("Do you offer tastings?".to_string()),
        };
        assert!(validate_contact(form).is_ok());
        assert_eq!(validate_contact(ContactForm::default()).unwrap_err().len(), 4);
    }
}
