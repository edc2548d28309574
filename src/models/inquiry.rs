use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Responded,
    Converted,
}

/// A custom-quote request. Standalone lead with denormalized contact
/// fields, not linked to the client table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i32,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub event_type: String,
    pub guest_count: i32,
    pub budget_range: String,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub event_type: String,
    pub guest_count: i32,
    pub budget_range: String,
    pub message: String,
}

/// Admin-settable fields for an inquiry.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryPatch {
    pub status: Option<InquiryStatus>,
    pub budget_range: Option<String>,
    pub message: Option<String>,
}
