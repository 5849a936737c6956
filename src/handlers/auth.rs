use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::db::{self, member_repo};
use crate::error::{AppError, Result};
use crate::middleware::Principal;
use crate::models::{Member, MemberRole};
use crate::services::RoleResolver;
use crate::validators;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub member: Member,
    pub assigned_role: MemberRole,
}

/// POST /api/v1/auth/register
///
/// Identity and email come from the verified principal, never from the
/// body; the assigned role comes from the allow-list resolver regardless
/// of anything the client sends.
pub async fn register(
    principal: Principal,
    pool: web::Data<PgPool>,
    roles: web::Data<RoleResolver>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if !validators::is_org_email(&principal.email, &config.org.email_domain) {
        return Err(AppError::InvalidEmailDomain(
            config.org.email_domain.clone(),
        ));
    }

    if !validators::is_plausible_graduation_year(req.graduation_year) {
        return Err(AppError::Validation(
            "graduation_year is out of range".to_string(),
        ));
    }

    if member_repo::find_by_identity(pool.get_ref(), &principal.identity)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyRegistered);
    }

    let assigned_role = roles.role_for_email(&principal.email);

    let profile = member_repo::NewMemberProfile {
        first_name: &req.first_name,
        last_name: &req.last_name,
        major: &req.major,
        graduation_year: req.graduation_year,
        phone_number: &req.phone_number,
    };

    let member = match member_repo::create_member(
        pool.get_ref(),
        &principal.identity,
        &principal.email,
        &profile,
        assigned_role,
    )
    .await
    {
        Ok(member) => member,
        // Lost a race (or the email is taken): same outcome as the
        // pre-check above
        Err(e) if db::is_unique_violation(&e) => return Err(AppError::AlreadyRegistered),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(email = %member.email, role = %member.role, "Member registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "Member registered successfully".to_string(),
        assigned_role: member.role,
        member,
    }))
}
