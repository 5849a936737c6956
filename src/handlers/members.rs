use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::member_repo;
use crate::error::{AppError, Result};
use crate::middleware::Principal;
use crate::models::{Member, MemberRole, PaymentStatus};
use crate::security::access;
use crate::validators;

/// List projection of a member. The external identity is deliberately
/// absent.
#[derive(Debug, Serialize)]
pub struct PublicMember {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub major: String,
    pub graduation_year: i32,
    pub phone_number: String,
    pub role: MemberRole,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for PublicMember {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            major: m.major,
            graduation_year: m.graduation_year,
            phone_number: m.phone_number,
            role: m.role,
            payment_status: m.payment_status,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 200))]
    pub major: String,

    pub graduation_year: i32,

    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: MemberRole,
}

#[derive(Debug, Deserialize)]
pub struct SetPaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

/// GET /api/v1/users/me
pub async fn get_current_member(
    principal: Principal,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let member = member_repo::find_by_identity(pool.get_ref(), &principal.identity)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(HttpResponse::Ok().json(member))
}

/// PUT /api/v1/users/me
///
/// Self-service profile update. Touches profile fields only; role,
/// payment status and email stay as they are no matter what is sent.
pub async fn update_my_profile(
    principal: Principal,
    pool: web::Data<PgPool>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if !validators::is_plausible_graduation_year(req.graduation_year) {
        return Err(AppError::Validation(
            "graduation_year is out of range".to_string(),
        ));
    }

    let profile = member_repo::NewMemberProfile {
        first_name: &req.first_name,
        last_name: &req.last_name,
        major: &req.major,
        graduation_year: req.graduation_year,
        phone_number: &req.phone_number,
    };

    let member = member_repo::update_profile(pool.get_ref(), &principal.identity, &profile)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated successfully",
        "member": member
    })))
}

/// GET /api/v1/users/members
///
/// Any authenticated principal; identity excluded from the projection.
pub async fn list_members(_principal: Principal, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let members: Vec<PublicMember> = member_repo::list_all(pool.get_ref())
        .await?
        .into_iter()
        .map(PublicMember::from)
        .collect();

    Ok(HttpResponse::Ok().json(members))
}

/// GET /api/v1/users/all (admin)
pub async fn list_all_members(
    principal: Principal,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    access::require_admin(pool.get_ref(), &principal.identity).await?;

    let members: Vec<PublicMember> = member_repo::list_all(pool.get_ref())
        .await?
        .into_iter()
        .map(PublicMember::from)
        .collect();

    Ok(HttpResponse::Ok().json(members))
}

/// PUT /api/v1/users/{id}/role (admin)
pub async fn set_member_role(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<SetRoleRequest>,
) -> Result<HttpResponse> {
    let admin = access::require_admin(pool.get_ref(), &principal.identity).await?;

    let member_id = path.into_inner();
    let member = member_repo::set_role(pool.get_ref(), member_id, req.role)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    tracing::info!(
        member = %member.email,
        role = %member.role,
        changed_by = %admin.email,
        "Member role updated"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Member role updated to {}", member.role),
        "member": PublicMember::from(member)
    })))
}

/// PUT /api/v1/users/{id}/payment (admin)
pub async fn set_member_payment_status(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<SetPaymentStatusRequest>,
) -> Result<HttpResponse> {
    access::require_admin(pool.get_ref(), &principal.identity).await?;

    let member_id = path.into_inner();
    let member = member_repo::set_payment_status(pool.get_ref(), member_id, req.payment_status)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment status updated",
        "member": PublicMember::from(member)
    })))
}

/// DELETE /api/v1/users/{id} (admin, irreversible)
pub async fn delete_member(
    principal: Principal,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let admin = access::require_admin(pool.get_ref(), &principal.identity).await?;

    let member_id = path.into_inner();
    let deleted = member_repo::delete_member(pool.get_ref(), member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    tracing::info!(
        member = %deleted.email,
        deleted_by = %admin.email,
        "Member deleted"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Member deleted successfully"
    })))
}
