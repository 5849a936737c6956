/// Event repository - event CRUD and the attendee ledger
use crate::models::{Event, EventAttendee};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewEvent<'a> {
    pub name: &'a str,
    pub date: DateTime<Utc>,
    pub time: &'a str,
    pub location: &'a str,
    pub description: &'a str,
}

pub async fn create_event(
    pool: &PgPool,
    fields: &NewEvent<'_>,
    created_by: &str,
) -> Result<Event, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (id, name, date, time, location, description, created_by, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, date, time, location, description, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(fields.name)
    .bind(fields.date)
    .bind(fields.time)
    .bind(fields.location)
    .bind(fields.description)
    .bind(created_by)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, event_id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, date, time, location, description, created_by, created_at
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await
}

/// All events, soonest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, date, time, location, description, created_by, created_at
        FROM events
        ORDER BY date ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn update_event(
    pool: &PgPool,
    event_id: Uuid,
    fields: &NewEvent<'_>,
) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        UPDATE events
        SET name = $1, date = $2, time = $3, location = $4, description = $5
        WHERE id = $6
        RETURNING id, name, date, time, location, description, created_by, created_at
        "#,
    )
    .bind(fields.name)
    .bind(fields.date)
    .bind(fields.time)
    .bind(fields.location)
    .bind(fields.description)
    .bind(event_id)
    .fetch_optional(pool)
    .await
}

/// Delete an event and (via cascade) its attendee rows.
pub async fn delete_event(pool: &PgPool, event_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM events
        WHERE id = $1
        "#,
    )
    .bind(event_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record an RSVP. The membership check and the append are one conditional
/// insert: the primary key on (event_id, member_identity) is the uniqueness
/// predicate, so two concurrent calls for the same pair resolve in the
/// store and exactly one returns a row. None means the identity had already
/// RSVP'd.
pub async fn add_attendee(
    pool: &PgPool,
    event_id: Uuid,
    member_identity: &str,
    display_name: &str,
) -> Result<Option<EventAttendee>, sqlx::Error> {
    sqlx::query_as::<_, EventAttendee>(
        r#"
        INSERT INTO event_attendees (event_id, member_identity, display_name, rsvp_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (event_id, member_identity) DO NOTHING
        RETURNING event_id, member_identity, display_name, rsvp_at
        "#,
    )
    .bind(event_id)
    .bind(member_identity)
    .bind(display_name)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Attendees in RSVP order
pub async fn list_attendees(
    pool: &PgPool,
    event_id: Uuid,
) -> Result<Vec<EventAttendee>, sqlx::Error> {
    sqlx::query_as::<_, EventAttendee>(
        r#"
        SELECT event_id, member_identity, display_name, rsvp_at
        FROM event_attendees
        WHERE event_id = $1
        ORDER BY rsvp_at ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await
}

pub async fn count_attendees(pool: &PgPool, event_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM event_attendees
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
