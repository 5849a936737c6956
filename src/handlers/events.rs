use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{event_repo, member_repo};
use crate::error::{AppError, Result};
use crate::middleware::Principal;
use crate::security::access;

#[derive(Debug, Deserialize, Validate)]
pub struct EventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 100))]
    pub time: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,
}

impl EventRequest {
    fn as_new_event(&self) -> event_repo::NewEvent<'_> {
        event_repo::NewEvent {
            name: &self.name,
            date: self.date,
            time: &self.time,
            location: &self.location,
            description: &self.description,
        }
    }
}

/// GET /api/v1/events (public, soonest first)
pub async fn list_events(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let events = event_repo::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// GET /api/v1/events/{id} (public)
pub async fn get_event(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let event = event_repo::find_by_id(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(HttpResponse::Ok().json(event))
}

/// POST /api/v1/events (admin)
pub async fn create_event(
    principal: Principal,
    pool: web::Data<PgPool>,
    req: web::Json<EventRequest>,
) -> Result<HttpResponse> {
    let admin = access::require_admin(pool.get_ref(), &principal.identity).await?;
    req.validate()?;

    let event = event_repo::create_event(pool.get_ref(), &req.as_new_event(), &admin.identity)
        .await?;

    tracing::info!(event = %event.name, created_by = %admin.email, "Event created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Event created successfully",
        "event": event
    })))
}

/// PUT /api/v1/events/{id} (admin)
pub async fn update_event(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<EventRequest>,
) -> Result<HttpResponse> {
    access::require_admin(pool.get_ref(), &principal.identity).await?;
    req.validate()?;

    let event = event_repo::update_event(pool.get_ref(), path.into_inner(), &req.as_new_event())
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Event updated successfully",
        "event": event
    })))
}

/// DELETE /api/v1/events/{id} (admin)
pub async fn delete_event(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    access::require_admin(pool.get_ref(), &principal.identity).await?;

    let deleted = event_repo::delete_event(pool.get_ref(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Event deleted successfully"
    })))
}

/// POST /api/v1/events/{id}/rsvp
///
/// The duplicate check and the append are a single conditional insert in
/// the repository; this handler never does a read-then-write on the
/// attendee set.
pub async fn rsvp(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();

    event_repo::find_by_id(pool.get_ref(), event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    // Display name comes from the caller's own membership record
    let member = member_repo::find_by_identity(pool.get_ref(), &principal.identity)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    let attendee = event_repo::add_attendee(
        pool.get_ref(),
        event_id,
        &principal.identity,
        &member.display_name(),
    )
    .await?
    .ok_or(AppError::AlreadyRsvped)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "RSVP successful",
        "attendee": attendee
    })))
}

/// GET /api/v1/events/{id}/attendees (admin)
pub async fn list_attendees(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    access::require_admin(pool.get_ref(), &principal.identity).await?;

    let event_id = path.into_inner();
    event_repo::find_by_id(pool.get_ref(), event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let attendees = event_repo::list_attendees(pool.get_ref(), event_id).await?;
    Ok(HttpResponse::Ok().json(attendees))
}
