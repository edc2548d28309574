#[macro_use]
extern crate rocket;

mod error;
mod models;
mod repository;
mod services;

use std::sync::Arc;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{Build, Request, Response, Rocket, State};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ApiResponse};
use models::booking::{Booking, BookingPatch, NewBooking};
use models::client::{Client, NewClient};
use models::inquiry::{Inquiry, InquiryPatch};
use models::package::Package;
use repository::storage::Storage;
use services::notifier::{dispatch, LogNotifier, Notification, Notifier};
use services::validation::{
    validate_booking, validate_contact, validate_inquiry, BookingForm, ContactForm, InquiryForm,
};

// CORS fairing so the marketing site can call the API from the browser.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));
    }
}

#[options("/<_..>")]
fn all_options() -> Status {
    Status::Ok
}

// --- Public routes ---

#[get("/packages")]
async fn get_packages(storage: &State<Storage>) -> Json<ApiResponse<Vec<Package>>> {
    Json(ApiResponse::success("200: Success", storage.active_packages()))
}

#[get("/packages/<id>")]
async fn get_package(
    storage: &State<Storage>,
    id: i32,
) -> (Status, Json<ApiResponse<Package>>) {
    match storage.get_package(id) {
        Some(package) => (Status::Ok, Json(ApiResponse::success("200: Success", package))),
        None => ApiError::NotFound("Package").into_response(),
    }
}

#[post("/bookings", format = "json", data = "<form>")]
async fn create_booking(
    storage: &State<Storage>,
    notifier: &State<Arc<dyn Notifier>>,
    form: Json<BookingForm>,
) -> (Status, Json<ApiResponse<Booking>>) {
    let request = match validate_booking(form.into_inner()) {
        Ok(request) => request,
        Err(errors) => return ApiError::Validation(errors).into_response(),
    };

    // Upsert-by-email: a repeat booking never rewrites the stored contact.
    let client = storage.find_or_create_client(NewClient {
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
    });

    // Package pricing applies only to non-custom bookings; custom requests
    // keep whatever amount (usually none) was submitted.
    let mut total_amount = request.total_amount;
    if let Some(package_id) = request.package_id {
        if !request.is_custom_package {
            if let Some(total) = storage
                .get_package(package_id)
                .and_then(|p| p.total_for(request.guest_count))
            {
                total_amount = Some(total);
            }
        }
    }

    let booking = storage.create_booking(NewBooking {
        client_id: client.id,
        package_id: request.package_id,
        event_type: request.event_type,
        event_date: request.event_date,
        event_time: request.event_time,
        event_location: request.event_location,
        guest_count: request.guest_count,
        total_amount,
        special_requests: request.special_requests,
        budget_range: request.budget_range,
        is_custom_package: request.is_custom_package,
    });

    info!(booking_id = booking.id, client_id = client.id, "booking created");
    dispatch(
        notifier.inner(),
        Notification::BookingConfirmation {
            email: client.email,
            booking_id: booking.id,
        },
    );

    (Status::Created, Json(ApiResponse::success("201: Created", booking)))
}

#[get("/clients/<email>")]
async fn get_client(
    storage: &State<Storage>,
    email: &str,
) -> (Status, Json<ApiResponse<Client>>) {
    match storage.get_client_by_email(email) {
        Some(client) => (Status::Ok, Json(ApiResponse::success("200: Success", client))),
        None => ApiError::NotFound("Client").into_response(),
    }
}

#[get("/clients/<email>/bookings")]
async fn get_client_bookings(
    storage: &State<Storage>,
    email: &str,
) -> (Status, Json<ApiResponse<Vec<Booking>>>) {
    match storage.get_client_by_email(email) {
        Some(client) => (
            Status::Ok,
            Json(ApiResponse::success(
                "200: Success",
                storage.bookings_by_client(client.id),
            )),
        ),
        None => ApiError::NotFound("Client").into_response(),
    }
}

#[post("/inquiries", format = "json", data = "<form>")]
async fn create_inquiry(
    storage: &State<Storage>,
    notifier: &State<Arc<dyn Notifier>>,
    form: Json<InquiryForm>,
) -> (Status, Json<ApiResponse<Inquiry>>) {
    let new_inquiry = match validate_inquiry(form.into_inner()) {
        Ok(new_inquiry) => new_inquiry,
        Err(errors) => return ApiError::Validation(errors).into_response(),
    };

    let inquiry = storage.create_inquiry(new_inquiry);

    info!(inquiry_id = inquiry.id, "inquiry created");
    dispatch(
        notifier.inner(),
        Notification::InquiryReceived {
            email: inquiry.client_email.clone(),
            inquiry_id: inquiry.id,
        },
    );

    (Status::Created, Json(ApiResponse::success("201: Created", inquiry)))
}

#[post("/contact", format = "json", data = "<form>")]
async fn submit_contact(
    notifier: &State<Arc<dyn Notifier>>,
    form: Json<ContactForm>,
) -> (Status, Json<ApiResponse<()>>) {
    // Contact messages are relayed, not persisted.
    let request = match validate_contact(form.into_inner()) {
        Ok(request) => request,
        Err(errors) => return ApiError::Validation(errors).into_response(),
    };

    dispatch(
        notifier.inner(),
        Notification::ContactReceived {
            email: request.email,
            subject: request.subject,
        },
    );

    (
        Status::Ok,
        Json(ApiResponse {
            message: "200: Message sent successfully".to_string(),
            result: None,
            errors: None,
        }),
    )
}

// --- Admin routes ---

#[get("/admin/bookings")]
async fn admin_bookings(storage: &State<Storage>) -> Json<ApiResponse<Vec<Booking>>> {
    Json(ApiResponse::success("200: Success", storage.all_bookings()))
}

#[get("/admin/inquiries")]
async fn admin_inquiries(storage: &State<Storage>) -> Json<ApiResponse<Vec<Inquiry>>> {
    Json(ApiResponse::success("200: Success", storage.all_inquiries()))
}

#[patch("/admin/bookings/<id>", format = "json", data = "<patch>")]
async fn update_booking(
    storage: &State<Storage>,
    id: i32,
    patch: Json<BookingPatch>,
) -> (Status, Json<ApiResponse<Booking>>) {
    match storage.update_booking(id, patch.into_inner()) {
        Some(booking) => {
            info!(booking_id = id, status = ?booking.status, "booking updated");
            (Status::Ok, Json(ApiResponse::success("200: Updated", booking)))
        }
        None => ApiError::NotFound("Booking").into_response(),
    }
}

#[patch("/admin/inquiries/<id>", format = "json", data = "<patch>")]
async fn update_inquiry(
    storage: &State<Storage>,
    id: i32,
    patch: Json<InquiryPatch>,
) -> (Status, Json<ApiResponse<Inquiry>>) {
    match storage.update_inquiry(id, patch.into_inner()) {
        Some(inquiry) => {
            info!(inquiry_id = id, status = ?inquiry.status, "inquiry updated");
            (Status::Ok, Json(ApiResponse::success("200: Updated", inquiry)))
        }
        None => ApiError::NotFound("Inquiry").into_response(),
    }
}

// --- Catchers ---

#[catch(404)]
fn not_found(req: &Request) -> Json<ApiResponse<()>> {
    Json(ApiResponse::failure(format!(
        "404: '{}' route not found",
        req.uri()
    )))
}

#[catch(400)]
fn bad_request() -> Json<ApiResponse<()>> {
    Json(ApiResponse::failure("400: Bad Request"))
}

#[catch(422)]
fn unprocessable() -> Json<ApiResponse<()>> {
    Json(ApiResponse::failure("422: Malformed request body"))
}

#[catch(500)]
fn internal_error() -> Json<ApiResponse<()>> {
    ApiError::Internal.into_response().1
}

fn build_rocket(storage: Storage, notifier: Arc<dyn Notifier>) -> Rocket<Build> {
    rocket::build()
        .manage(storage)
        .manage(notifier)
        .attach(Cors)
        .mount(
            "/api",
            routes![
                all_options,
                get_packages,
                get_package,
                create_booking,
                get_client,
                get_client_bookings,
                create_inquiry,
                submit_contact,
                admin_bookings,
                admin_inquiries,
                update_booking,
                update_inquiry,
            ],
        )
        .register(
            "/",
            catchers![not_found, bad_request, unprocessable, internal_error],
        )
}

#[launch]
fn rocket() -> _ {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage = Storage::new();
    info!("seeded default catering packages");

    build_rocket(storage, Arc::new(LogNotifier))
}
