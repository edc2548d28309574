use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer record, deduplicated by email across bookings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub member_since: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}
