use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackageCategory {
    Corporate,
    Wedding,
    Casual,
    Custom,
}

/// A predefined catering offering with a per-person price. Immutable
/// reference data, seeded at startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_per_person: String, // decimal string, 2 fraction digits
    pub min_guests: i32,
    pub features: Vec<String>,
    pub category: PackageCategory,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub name: String,
    pub description: String,
    pub price_per_person: String,
    pub min_guests: i32,
    pub features: Vec<String>,
    pub category: PackageCategory,
    pub is_active: bool,
}

impl Package {
    /// Total for a party of `guest_count`, rounded to 2 decimal places.
    /// Returns `None` when the stored price does not parse as a number.
    pub fn total_for(&self, guest_count: i32) -> Option<String> {
        let price: f64 = self.price_per_person.parse().ok()?;
        Some(format!("{:.2}", price * guest_count as f64))
    }
}
