use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use scheduling_cell::router::scheduling_routes;
use shared_config::AppConfig;

fn create_test_app() -> Router {
    scheduling_routes(Arc::new(AppConfig::default()))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_response: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json_response)
}

fn professional_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Ana Silva",
        "specialty": "Cardiology",
        "schedule": [
            { "weekday": "monday", "start_time": "08:00", "end_time": "12:00" },
            { "weekday": "wednesday", "start_time": "14:00", "end_time": "16:00" }
        ],
        "breaks": [
            { "weekday": "monday", "start_time": "10:00", "end_time": "10:30", "label": "Lunch" }
        ],
        "consultation_minutes": 30
    })
}

#[tokio::test]
async fn generate_slots_applies_breaks() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/slots",
        json!({
            "weekday": "monday",
            "start_time": "08:00",
            "end_time": "12:00",
            "duration_minutes": 30,
            "breaks": [
                { "weekday": "monday", "start_time": "10:00", "end_time": "10:30" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["slots"],
        json!(["08:00", "08:30", "09:00", "09:30", "10:30", "11:00", "11:30"])
    );
}

#[tokio::test]
async fn generate_slots_falls_back_to_the_configured_duration() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/slots",
        json!({
            "weekday": "tuesday",
            "start_time": "09:00",
            "end_time": "10:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_minutes"], 30);
    assert_eq!(body["slots"], json!(["09:00", "09:30"]));
}

#[tokio::test]
async fn generate_slots_ignores_breaks_for_other_weekdays() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/slots",
        json!({
            "weekday": "monday",
            "start_time": "08:00",
            "end_time": "09:00",
            "duration_minutes": 30,
            "breaks": [
                { "weekday": "friday", "start_time": "08:00", "end_time": "09:00" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"], json!(["08:00", "08:30"]));
}

#[tokio::test]
async fn generate_slots_rejects_an_inverted_window() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/slots",
        json!({
            "weekday": "monday",
            "start_time": "12:00",
            "end_time": "08:00",
            "duration_minutes": 30
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("before end time"));
}

#[tokio::test]
async fn generate_slots_rejects_a_non_positive_duration() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/slots",
        json!({
            "weekday": "monday",
            "start_time": "08:00",
            "end_time": "12:00",
            "duration_minutes": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn availability_endpoint_maps_every_configured_weekday() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/availability",
        json!({ "professional": professional_json("p1") }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["professional_id"], "p1");
    assert_eq!(
        body["availability"]["monday"],
        json!(["08:00", "08:30", "09:00", "09:30", "10:30", "11:00", "11:30"])
    );
    assert_eq!(
        body["availability"]["wednesday"],
        json!(["14:00", "14:30", "15:00", "15:30"])
    );
}

#[tokio::test]
async fn specialty_endpoint_unions_member_availability() {
    let app = create_test_app();

    let mut second = professional_json("p2");
    second["schedule"] = json!([
        { "weekday": "monday", "start_time": "11:00", "end_time": "13:00" }
    ]);
    second["breaks"] = json!([]);

    let (status, body) = post_json(
        app,
        "/availability/specialty",
        json!({ "professionals": [professional_json("p1"), second] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(
        body["availability"]["monday"],
        json!([
            "08:00", "08:30", "09:00", "09:30", "10:30", "11:00", "11:30", "12:00", "12:30"
        ])
    );
}

#[tokio::test]
async fn bookable_slots_endpoint_filters_booked_cells() {
    let app = create_test_app();

    // 2025-09-15 is a Monday.
    let (status, body) = post_json(
        app,
        "/slots/bookable",
        json!({
            "professional": professional_json("p1"),
            "date": "2025-09-15",
            "bookings": [
                {
                    "id": "b1",
                    "patient_name": "Pedro Gomes",
                    "professional_id": "p1",
                    "start": "2025-09-15T08:30",
                    "end": "2025-09-15T09:00",
                    "status": "confirmed"
                },
                {
                    "id": "b2",
                    "patient_name": "Laura Dias",
                    "professional_id": "p1",
                    "start": "2025-09-15T09:00",
                    "end": "2025-09-15T09:30",
                    "status": "cancelled"
                }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 08:30 is taken; the cancelled 09:00 booking does not block.
    assert_eq!(
        body["slots"],
        json!(["08:00", "09:00", "09:30", "10:30", "11:00", "11:30"])
    );
}

#[tokio::test]
async fn placements_endpoint_assigns_stable_indices() {
    let app = create_test_app();

    let booking = |id: &str, professional: &str| {
        json!({
            "id": id,
            "patient_name": "Shared Cell",
            "professional_id": professional,
            "start": "2025-09-16T14:00",
            "end": "2025-09-16T14:30",
            "status": "confirmed"
        })
    };

    let (status, body) = post_json(
        app,
        "/placements",
        json!({
            "date": "2025-09-16",
            "time": "14:00",
            "bookings": [booking("a", "p1"), booking("b", "p2"), booking("c", "p3")]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["occupied"], true);
    assert_eq!(body["time"], "14:00");
    let placements = body["placements"].as_array().unwrap();
    assert_eq!(placements.len(), 3);
    for (index, placement) in placements.iter().enumerate() {
        assert_eq!(placement["index"], index);
        assert_eq!(placement["total"], 3);
    }
}

#[tokio::test]
async fn day_placements_endpoint_groups_cells() {
    let app = create_test_app();

    let (status, body) = post_json(
        app,
        "/placements/day",
        json!({
            "date": "2025-09-16",
            "bookings": [
                {
                    "id": "a",
                    "patient_name": "Morning Visit",
                    "professional_id": "p1",
                    "start": "2025-09-16T09:00",
                    "end": "2025-09-16T09:30",
                    "status": "confirmed"
                },
                {
                    "id": "b",
                    "patient_name": "Afternoon Visit",
                    "professional_id": "p2",
                    "start": "2025-09-16T14:00",
                    "end": "2025-09-16T14:30",
                    "status": "pending"
                },
                {
                    "id": "c",
                    "patient_name": "Afternoon Visit",
                    "professional_id": "p3",
                    "start": "2025-09-16T14:00",
                    "end": "2025-09-16T14:30",
                    "status": "confirmed"
                }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let cells = body["cells"].as_object().unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells["09:00"].as_array().unwrap().len(), 1);
    assert_eq!(cells["14:00"].as_array().unwrap().len(), 2);
    assert_eq!(cells["14:00"][1]["booking_id"], "c");
    assert_eq!(cells["14:00"][1]["index"], 1);
}
