/// Member repository - handles all database operations for membership records
use crate::models::{Member, MemberRole, PaymentStatus};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewMemberProfile<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub major: &'a str,
    pub graduation_year: i32,
    pub phone_number: &'a str,
}

/// Create a new membership record. Role comes from the identity resolver;
/// payment status always starts as not_paid.
pub async fn create_member(
    pool: &PgPool,
    identity: &str,
    email: &str,
    profile: &NewMemberProfile<'_>,
    role: MemberRole,
) -> Result<Member, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        "#
    )
    .bind(id)
    .bind(identity)
    .bind(email.to_lowercase())
    .bind(profile.first_name)
    .bind(profile.last_name)
    .bind(profile.major)
    .bind(profile.graduation_year)
    .bind(profile.phone_number)
    .bind(role)
    .bind(PaymentStatus::NotPaid)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a member by external identity
pub async fn find_by_identity(
    pool: &PgPool,
    identity: &str,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        SELECT id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        FROM members
        WHERE identity = $1
        "#
    )
    .bind(identity)
    .fetch_optional(pool)
    .await
}

/// Find a member by record id
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        SELECT id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        FROM members
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// All members and admins, newest first
pub async fn list_all(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        SELECT id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        FROM members
        ORDER BY created_at DESC
        "#
    )
    .fetch_all(pool)
    .await
}

/// Overwrite profile fields only. Role, payment status, email and identity
/// are never touched here.
pub async fn update_profile(
    pool: &PgPool,
    identity: &str,
    profile: &NewMemberProfile<'_>,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        UPDATE members
        SET first_name = $1, last_name = $2, major = $3, graduation_year = $4, phone_number = $5
        WHERE identity = $6
        RETURNING id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        "#
    )
    .bind(profile.first_name)
    .bind(profile.last_name)
    .bind(profile.major)
    .bind(profile.graduation_year)
    .bind(profile.phone_number)
    .bind(identity)
    .fetch_optional(pool)
    .await
}

/// Set a member's role (admin operation)
pub async fn set_role(
    pool: &PgPool,
    member_id: Uuid,
    role: MemberRole,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        UPDATE members
        SET role = $1
        WHERE id = $2
        RETURNING id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        "#
    )
    .bind(role)
    .bind(member_id)
    .fetch_optional(pool)
    .await
}

/// Set a member's payment status (admin operation)
pub async fn set_payment_status(
    pool: &PgPool,
    member_id: Uuid,
    status: PaymentStatus,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        UPDATE members
        SET payment_status = $1
        WHERE id = $2
        RETURNING id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        "#
    )
    .bind(status)
    .bind(member_id)
    .fetch_optional(pool)
    .await
}

/// Delete a member. Returns the deleted record so the caller can log it.
pub async fn delete_member(pool: &PgPool, member_id: Uuid) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        r#"
        DELETE FROM members
        WHERE id = $1
        RETURNING id, identity, email, first_name, last_name, major, graduation_year, phone_number, role, payment_status, created_at
        "#
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await
}
