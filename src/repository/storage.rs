use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::models::booking::{Booking, BookingPatch, BookingStatus, NewBooking};
use crate::models::client::{Client, NewClient};
use crate::models::inquiry::{Inquiry, InquiryPatch, InquiryStatus, NewInquiry};
use crate::models::package::{NewPackage, Package, PackageCategory};

/// In-memory entity store for clients, packages, bookings and inquiries.
///
/// All four entity kinds share one mutex so the read-then-write sequences
/// (client lookup-or-create, id assignment) stay atomic when Rocket runs
/// handlers on multiple workers. Data lives for the process lifetime; there
/// are no delete operations.
pub struct Storage {
    inner: Mutex<StorageInner>,
}

#[derive(Default)]
struct StorageInner {
    clients: HashMap<i32, Client>,
    packages: HashMap<i32, Package>,
    bookings: HashMap<i32, Booking>,
    inquiries: HashMap<i32, Inquiry>,
    // Last assigned id per kind; counters are independent.
    client_id: i32,
    package_id: i32,
    booking_id: i32,
    inquiry_id: i32,
}

impl Storage {
    pub fn new() -> Self {
        let storage = Storage {
            inner: Mutex::new(StorageInner::default()),
        };
        storage.seed_default_packages();
        storage
    }

    fn lock(&self) -> MutexGuard<'_, StorageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Client operations ---

    pub fn get_client(&self, id: i32) -> Option<Client> {
        self.lock().clients.get(&id).cloned()
    }

    pub fn get_client_by_email(&self, email: &str) -> Option<Client> {
        let inner = self.lock();
        inner.clients.values().find(|c| c.email == email).cloned()
    }

    pub fn create_client(&self, new_client: NewClient) -> Client {
        let mut inner = self.lock();
        Self::insert_client(&mut inner, new_client)
    }

    /// Upsert-by-email: returns the existing client for this email, or
    /// creates one. An existing client's stored name and phone are never
    /// overwritten. Runs under a single lock so concurrent submissions
    /// with the same email cannot create duplicates.
    pub fn find_or_create_client(&self, new_client: NewClient) -> Client {
        let mut inner = self.lock();
        if let Some(existing) = inner
            .clients
            .values()
            .find(|c| c.email == new_client.email)
            .cloned()
        {
            return existing;
        }
        Self::insert_client(&mut inner, new_client)
    }

    fn insert_client(inner: &mut StorageInner, new_client: NewClient) -> Client {
        inner.client_id += 1;
        let client = Client {
            id: inner.client_id,
            full_name: new_client.full_name,
            email: new_client.email,
            phone: new_client.phone,
            member_since: Utc::now(),
        };
        inner.clients.insert(client.id, client.clone());
        client
    }

    // --- Package operations ---

    pub fn get_package(&self, id: i32) -> Option<Package> {
        self.lock().packages.get(&id).cloned()
    }

    /// Active packages only, in id order.
    pub fn active_packages(&self) -> Vec<Package> {
        let inner = self.lock();
        let mut packages: Vec<Package> = inner
            .packages
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        packages.sort_by_key(|p| p.id);
        packages
    }

    pub fn create_package(&self, new_package: NewPackage) -> Package {
        let mut inner = self.lock();
        inner.package_id += 1;
        let package = Package {
            id: inner.package_id,
            name: new_package.name,
            description: new_package.description,
            price_per_person: new_package.price_per_person,
            min_guests: new_package.min_guests,
            features: new_package.features,
            category: new_package.category,
            is_active: new_package.is_active,
        };
        inner.packages.insert(package.id, package.clone());
        package
    }

    // --- Booking operations ---

    pub fn get_booking(&self, id: i32) -> Option<Booking> {
        self.lock().bookings.get(&id).cloned()
    }

    pub fn all_bookings(&self) -> Vec<Booking> {
        let inner = self.lock();
        let mut bookings: Vec<Booking> = inner.bookings.values().cloned().collect();
        bookings.sort_by_key(|b| b.id);
        bookings
    }

    pub fn bookings_by_client(&self, client_id: i32) -> Vec<Booking> {
        let inner = self.lock();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.client_id == client_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.id);
        bookings
    }

    pub fn create_booking(&self, new_booking: NewBooking) -> Booking {
        let mut inner = self.lock();
        inner.booking_id += 1;
        let now = Utc::now();
        let booking = Booking {
            id: inner.booking_id,
            client_id: new_booking.client_id,
            package_id: new_booking.package_id,
            event_type: new_booking.event_type,
            event_date: new_booking.event_date,
            event_time: new_booking.event_time,
            event_location: new_booking.event_location,
            guest_count: new_booking.guest_count,
            total_amount: new_booking.total_amount,
            status: BookingStatus::default(),
            special_requests: new_booking.special_requests,
            budget_range: new_booking.budget_range,
            is_custom_package: new_booking.is_custom_package,
            created_at: now,
            updated_at: now,
        };
        inner.bookings.insert(booking.id, booking.clone());
        booking
    }

    /// Merges the set fields of the patch into an existing booking and
    /// refreshes `updatedAt`. Returns `None` when the id is absent.
    pub fn update_booking(&self, id: i32, patch: BookingPatch) -> Option<Booking> {
        let mut inner = self.lock();
        let booking = inner.bookings.get_mut(&id)?;
        if let Some(status) = patch.status {
            booking.status = status;
        }
        if let Some(event_date) = patch.event_date {
            booking.event_date = event_date;
        }
        if let Some(event_time) = patch.event_time {
            booking.event_time = event_time;
        }
        if let Some(event_location) = patch.event_location {
            booking.event_location = Some(event_location);
        }
        if let Some(guest_count) = patch.guest_count {
            booking.guest_count = guest_count;
        }
        if let Some(total_amount) = patch.total_amount {
            booking.total_amount = Some(total_amount);
        }
        if let Some(special_requests) = patch.special_requests {
            booking.special_requests = Some(special_requests);
        }
        if let Some(budget_range) = patch.budget_range {
            booking.budget_range = Some(budget_range);
        }
        booking.updated_at = Utc::now();
        Some(booking.clone())
    }

    // --- Inquiry operations ---

    pub fn get_inquiry(&self, id: i32) -> Option<Inquiry> {
        self.lock().inquiries.get(&id).cloned()
    }

    pub fn all_inquiries(&self) -> Vec<Inquiry> {
        let inner = self.lock();
        let mut inquiries: Vec<Inquiry> = inner.inquiries.values().cloned().collect();
        inquiries.sort_by_key(|i| i.id);
        inquiries
    }

    pub fn create_inquiry(&self, new_inquiry: NewInquiry) -> Inquiry {
        let mut inner = self.lock();
        inner.inquiry_id += 1;
        let inquiry = Inquiry {
            id: inner.inquiry_id,
            client_name: new_inquiry.client_name,
            client_email: new_inquiry.client_email,
            client_phone: new_inquiry.client_phone,
            event_type: new_inquiry.event_type,
            guest_count: new_inquiry.guest_count,
            budget_range: new_inquiry.budget_range,
            message: new_inquiry.message,
            status: InquiryStatus::default(),
            created_at: Utc::now(),
        };
        inner.inquiries.insert(inquiry.id, inquiry.clone());
        inquiry
    }

    pub fn update_inquiry(&self, id: i32, patch: InquiryPatch) -> Option<Inquiry> {
        let mut inner = self.lock();
        let inquiry = inner.inquiries.get_mut(&id)?;
        if let Some(status) = patch.status {
            inquiry.status = status;
        }
        if let Some(budget_range) = patch.budget_range {
            inquiry.budget_range = budget_range;
        }
        if let Some(message) = patch.message {
            inquiry.message = message;
        }
        Some(inquiry.clone())
    }

    // --- Seed data ---

    fn seed_default_packages(&self) {
        let defaults = vec![
            NewPackage {
                name: "Corporate Elegance".to_string(),
                description: "Perfect for business meetings, conferences, and corporate events. Professional presentation with gourmet flavors.".to_string(),
                price_per_person: "45.00".to_string(),
                min_guests: 20,
                features: vec![
                    "Gourmet sandwich platters".to_string(),
                    "Fresh fruit and cheese boards".to_string(),
                    "Premium beverages included".to_string(),
                    "Professional service staff".to_string(),
                ],
                category: PackageCategory::Corporate,
                is_active: true,
            },
            NewPackage {
                name: "Wedding Bliss".to_string(),
                description: "Make your special day unforgettable with our premium wedding catering featuring multi-course meals and elegant service.".to_string(),
                price_per_person: "95.00".to_string(),
                min_guests: 50,
                features: vec![
                    "Three-course plated dinner".to_string(),
                    "Cocktail hour appetizers".to_string(),
                    "Wedding cake service".to_string(),
                    "Full bar service available".to_string(),
                ],
                category: PackageCategory::Wedding,
                is_active: true,
            },
            NewPackage {
                name: "Casual Gatherings".to_string(),
                description: "Perfect for family reunions, birthday parties, and casual celebrations. Delicious comfort food in a relaxed setting.".to_string(),
                price_per_person: "28.00".to_string(),
                min_guests: 15,
                features: vec![
                    "BBQ buffet with all fixings".to_string(),
                    "Homestyle side dishes".to_string(),
                    "Soft drinks and water".to_string(),
                    "Setup and cleanup".to_string(),
                ],
                category: PackageCategory::Casual,
                is_active: true,
            },
        ];

        for package in defaults {
            self.create_package(package);
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_client(email: &str) -> NewClient {
        NewClient {
            full_name: "Jane Doe".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn new_booking(client_id: i32) -> NewBooking {
        NewBooking {
            client_id,
            package_id: Some(2),
            event_type: "wedding".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            event_time: "18:00".to_string(),
            event_location: None,
            guest_count: 50,
            total_amount: Some("4750.00".to_string()),
            special_requests: None,
            budget_range: None,
            is_custom_package: false,
        }
    }

    #[test]
    fn ids_increase_independently_per_kind() {
        let storage = Storage::new();
        let first = storage.create_client(new_client("a@example.com"));
        let second = storage.create_client(new_client("b@example.com"));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let inquiry = storage.create_inquiry(NewInquiry {
            client_name: "Jane Doe".to_string(),
            client_email: "a@example.com".to_string(),
            client_phone: None,
            event_type: "corporate".to_string(),
            guest_count: 30,
            budget_range: "$1000-$2000".to_string(),
            message: "Looking for lunch catering".to_string(),
        });
        // Inquiry ids are not shared with client ids.
        assert_eq!(inquiry.id, 1);
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(storage.get_inquiry(1).map(|i| i.id), Some(1));
        assert_eq!(storage.get_client(2).map(|c| c.email), Some("b@example.com".to_string()));
    }

    #[test]
    fn seeds_three_active_packages() {
        let storage = Storage::new();
        let packages = storage.active_packages();
        assert_eq!(packages.len(), 3);
        assert_eq!(packages[0].name, "Corporate Elegance");
        assert_eq!(packages[1].price_per_person, "95.00");
        assert_eq!(packages[2].min_guests, 15);
    }

    #[test]
    fn inactive_packages_are_not_listed() {
        let storage = Storage::new();
        storage.create_package(NewPackage {
            name: "Retired Menu".to_string(),
            description: String::new(),
            price_per_person: "10.00".to_string(),
            min_guests: 5,
            features: vec![],
            category: PackageCategory::Custom,
            is_active: false,
        });
        assert_eq!(storage.active_packages().len(), 3);
        // Still fetchable by id.
        assert!(storage.get_package(4).is_some());
    }

    #[test]
    fn find_or_create_never_overwrites_an_existing_client() {
        let storage = Storage::new();
        let original = storage.create_client(new_client("jane@example.com"));

        let resolved = storage.find_or_create_client(NewClient {
            full_name: "J. Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-9999".to_string(),
        });
        assert_eq!(resolved.id, original.id);
        assert_eq!(resolved.full_name, "Jane Doe");
        assert_eq!(resolved.phone, "555-0100");

        // A different email still gets a fresh record.
        let other = storage.find_or_create_client(new_client("john@example.com"));
        assert_eq!(other.id, 2);
    }

    #[test]
    fn booking_defaults_to_pending_with_timestamps() {
        let storage = Storage::new();
        let client = storage.create_client(new_client("jane@example.com"));
        let booking = storage.create_booking(new_booking(client.id));
        assert_eq!(booking.id, 1);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn reads_are_idempotent() {
        let storage = Storage::new();
        let client = storage.create_client(new_client("jane@example.com"));
        let booking = storage.create_booking(new_booking(client.id));
        assert_eq!(storage.get_booking(booking.id), storage.get_booking(booking.id));
        assert_eq!(storage.get_package(2), storage.get_package(2));
    }

    #[test]
    fn update_booking_merges_patch_and_refreshes_updated_at() {
        let storage = Storage::new();
        let client = storage.create_client(new_client("jane@example.com"));
        let booking = storage.create_booking(new_booking(client.id));

        let patched = storage
            .update_booking(
                booking.id,
                BookingPatch {
                    status: Some(BookingStatus::Confirmed),
                    ..BookingPatch::default()
                },
            )
            .expect("booking exists");

        assert_eq!(patched.status, BookingStatus::Confirmed);
        assert!(patched.updated_at > booking.updated_at);
        // Untouched fields survive the merge.
        assert_eq!(patched.guest_count, 50);
        assert_eq!(patched.created_at, booking.created_at);
    }

    #[test]
    fn update_of_absent_id_returns_none() {
        let storage = Storage::new();
        assert!(storage.update_booking(99, BookingPatch::default()).is_none());
        assert!(storage.update_inquiry(99, InquiryPatch::default()).is_none());
    }

    #[test]
    fn bookings_by_client_filters_other_clients() {
        let storage = Storage::new();
        let jane = storage.create_client(new_client("jane@example.com"));
        let john = storage.create_client(new_client("john@example.com"));
        storage.create_booking(new_booking(jane.id));
        storage.create_booking(new_booking(jane.id));
        storage.create_booking(new_booking(john.id));

        assert_eq!(storage.bookings_by_client(jane.id).len(), 2);
        assert_eq!(storage.bookings_by_client(john.id).len(), 1);
        assert_eq!(storage.all_bookings().len(), 3);
    }
}
