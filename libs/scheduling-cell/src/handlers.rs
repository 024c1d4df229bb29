use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{hhmm, Booking, Break, Professional, Weekday, WeeklyInterval};
use crate::services::{availability, placement, slots};

// Request bodies. Every endpoint is a stateless computation over the
// snapshot carried in the request; nothing is fetched or stored here.

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub professional: Professional,
}

#[derive(Debug, Deserialize)]
pub struct SpecialtyAvailabilityRequest {
    #[serde(default)]
    pub professionals: Vec<Professional>,
}

#[derive(Debug, Deserialize)]
pub struct BookableSlotsRequest {
    pub professional: Professional,
    pub date: NaiveDate,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
pub struct PlacementRequest {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
pub struct DayPlacementsRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[axum::debug_handler]
pub async fn generate_slots(
    State(state): State<Arc<AppConfig>>,
    Json(query): Json<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let duration = query
        .duration_minutes
        .unwrap_or(state.default_consultation_minutes);

    if query.start_time >= query.end_time {
        return Err(AppError::ValidationError(
            "Start time must be before end time".to_string(),
        ));
    }
    if duration <= 0 {
        return Err(AppError::ValidationError(
            "Consultation duration must be positive".to_string(),
        ));
    }

    debug!(
        "Generating {}-minute slots for {} between {} and {}",
        duration, query.weekday, query.start_time, query.end_time
    );

    let interval = WeeklyInterval {
        weekday: query.weekday,
        start_time: query.start_time,
        end_time: query.end_time,
    };
    let day_breaks: Vec<Break> = query
        .breaks
        .into_iter()
        .filter(|b| b.weekday == query.weekday)
        .collect();

    let starts: Vec<String> = slots::slot_sequence(&interval, duration, &day_breaks).collect();

    Ok(Json(json!({
        "weekday": query.weekday,
        "duration_minutes": duration,
        "slots": starts,
    })))
}

#[axum::debug_handler]
pub async fn get_availability(
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let professional = request.professional;

    if professional.consultation_minutes <= 0 {
        return Err(AppError::ValidationError(
            "Consultation duration must be positive".to_string(),
        ));
    }

    debug!("Building availability for professional {}", professional.id);

    let availability = availability::professional_availability(&professional);

    Ok(Json(json!({
        "professional_id": professional.id,
        "availability": availability,
    })))
}

#[axum::debug_handler]
pub async fn get_specialty_availability(
    Json(request): Json<SpecialtyAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Merging availability across {} professionals",
        request.professionals.len()
    );

    let active = request.professionals.iter().filter(|p| p.active).count();
    let availability = availability::specialty_availability(&request.professionals);

    Ok(Json(json!({
        "availability": availability,
        "total": active,
    })))
}

#[axum::debug_handler]
pub async fn get_bookable_slots(
    Json(request): Json<BookableSlotsRequest>,
) -> Result<Json<Value>, AppError> {
    if request.professional.consultation_minutes <= 0 {
        return Err(AppError::ValidationError(
            "Consultation duration must be positive".to_string(),
        ));
    }

    debug!(
        "Computing bookable slots for professional {} on {}",
        request.professional.id, request.date
    );

    let starts = availability::bookable_slots(&request.professional, request.date, &request.bookings);

    Ok(Json(json!({
        "professional_id": request.professional.id,
        "date": request.date,
        "slots": starts,
    })))
}

#[axum::debug_handler]
pub async fn resolve_placement(
    Json(request): Json<PlacementRequest>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Resolving cell {} {} against {} bookings",
        request.date,
        request.time.format("%H:%M"),
        request.bookings.len()
    );

    let resolution = placement::resolve(request.date, request.time, &request.bookings);

    Ok(Json(json!({
        "date": request.date,
        "time": request.time.format("%H:%M").to_string(),
        "occupied": resolution.occupied,
        "placements": resolution.placements,
    })))
}

#[axum::debug_handler]
pub async fn resolve_day_placements(
    Json(request): Json<DayPlacementsRequest>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Resolving day grid for {} with {} bookings",
        request.date,
        request.bookings.len()
    );

    let cells = placement::day_placements(request.date, &request.bookings);

    Ok(Json(json!({
        "date": request.date,
        "cells": cells,
    })))
}
