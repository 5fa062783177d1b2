//! In-process HTTP helpers driving the full `/api` surface over the
//! in-memory store.

use actix_web::http::Method;
use actix_web::{App, test, web};
use futures::future::join_all;
use rideease::Trace;
use rideease::domain::{BookingPolicy, TRACE_ID_HEADER};
use rideease::inbound::http::configure_api;
use rideease::inbound::http::state::HttpState;
use rideease::test_support::in_memory_app;
use serde_json::{Value, json};

/// One request against the API.
pub struct Call {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl Call {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            token: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            token: None,
            body: Some(body),
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }
}

/// Status, trace header and JSON body of a response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// A registered account and its bearer token.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub token: String,
}

/// Fresh HTTP state over an empty in-memory store.
pub fn fresh_state() -> web::Data<HttpState> {
    web::Data::new(in_memory_app(BookingPolicy::default()).state)
}

fn to_request(call: Call) -> actix_http::Request {
    let mut request = test::TestRequest::default()
        .method(call.method)
        .uri(&call.path);
    if let Some(token) = call.token {
        request = request.insert_header(("Authorization", format!("Bearer {token}")));
    }
    if let Some(body) = call.body {
        request = request.set_json(body);
    }
    request.to_request()
}

/// Send every call concurrently through one app instance.
pub async fn send_all(state: &web::Data<HttpState>, calls: Vec<Call>) -> Vec<Reply> {
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure_api),
    )
    .await;
    let responses = join_all(
        calls
            .into_iter()
            .map(|call| test::call_service(&app, to_request(call))),
    )
    .await;

    let mut replies = Vec::with_capacity(responses.len());
    for response in responses {
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = test::read_body(response).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        replies.push(Reply {
            status,
            trace_id,
            body,
        });
    }
    replies
}

pub async fn send(state: &web::Data<HttpState>, call: Call) -> Reply {
    send_all(state, vec![call])
        .await
        .pop()
        .expect("one reply per call")
}

pub fn signup_body(name: &str, email: &str, phone: &str, role: &str) -> Value {
    let mut body = json!({
        "name": name,
        "email": email,
        "password": "Str0ng!pw",
        "phone": phone,
        "role": role,
    });
    if role == "driver" {
        body["driverDetails"] = json!({
            "licenseNumber": format!("DL-{phone}"),
            "vehicleType": "taxi",
            "vehicleNumber": format!("KA01-{phone}"),
            "experience": 4,
        });
    }
    body
}

/// Register an account through `POST /api/auth/signup`.
pub async fn register(
    state: &web::Data<HttpState>,
    name: &str,
    email: &str,
    phone: &str,
    role: &str,
) -> Account {
    let reply = send(
        state,
        Call::post("/api/auth/signup", signup_body(name, email, phone, role)),
    )
    .await;
    assert_eq!(reply.status, 201, "signup failed: {}", reply.body);
    Account {
        id: reply.body["user"]["id"]
            .as_str()
            .expect("user id")
            .to_owned(),
        token: reply.body["token"].as_str().expect("token").to_owned(),
    }
}

pub fn booking_body(passengers: i64) -> Value {
    json!({
        "pickupLocation": "A",
        "dropoffLocation": "B",
        "pickupTime": "2026-03-18T09:30:00Z",
        "price": 1200,
        "vehicleType": "taxi",
        "vehicleName": "WagonR Taxi",
        "passengers": passengers,
    })
}

/// Create a booking as `passenger` and return its id.
pub async fn book(state: &web::Data<HttpState>, passenger: &Account) -> String {
    let reply = send(
        state,
        Call::post("/api/bookings", booking_body(2)).bearer(&passenger.token),
    )
    .await;
    assert_eq!(reply.status, 201, "booking failed: {}", reply.body);
    reply.body["booking"]["id"]
        .as_str()
        .expect("booking id")
        .to_owned()
}
