use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A pending or confirmed reservation tied to a client and optionally
/// a package.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub client_id: i32,
    pub package_id: Option<i32>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub event_location: Option<String>,
    pub guest_count: i32,
    pub total_amount: Option<String>, // decimal string, 2 fraction digits
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub budget_range: Option<String>,
    pub is_custom_package: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: i32,
    pub package_id: Option<i32>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub event_location: Option<String>,
    pub guest_count: i32,
    pub total_amount: Option<String>,
    pub special_requests: Option<String>,
    pub budget_range: Option<String>,
    pub is_custom_package: bool,
}

/// Fields an admin may change after creation. Server-managed fields
/// (id, clientId, createdAt) are not settable; unknown fields in a
/// PATCH body are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub event_location: Option<String>,
    pub guest_count: Option<i32>,
    pub total_amount: Option<String>,
    pub special_requests: Option<String>,
    pub budget_range: Option<String>,
}
