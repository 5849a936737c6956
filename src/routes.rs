//! Route configuration
//!
//! Centralized route setup; each domain (auth, users, events) manages its
//! own routes.

use crate::handlers;
use crate::middleware::AuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .configure(routes::auth::configure)
            .configure(routes::users::configure)
            .configure(routes::events::configure),
    );
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod auth {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/auth")
                    .wrap(AuthMiddleware)
                    .route("/register", web::post().to(handlers::register)),
            );
        }
    }

    pub mod users {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/users/me")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(handlers::get_current_member))
                    .route("", web::put().to(handlers::update_my_profile)),
            )
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware)
                    .route("/members", web::get().to(handlers::list_members))
                    .route("/all", web::get().to(handlers::list_all_members))
                    .route("/{id}/role", web::put().to(handlers::set_member_role))
                    .route(
                        "/{id}/payment",
                        web::put().to(handlers::set_member_payment_status),
                    )
                    .route("/{id}", web::delete().to(handlers::delete_member)),
            );
        }
    }

    pub mod events {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/events")
                    .route("", web::get().to(handlers::list_events))
                    .route("/{id}", web::get().to(handlers::get_event))
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .route("", web::post().to(handlers::create_event))
                            .route("/{id}", web::put().to(handlers::update_event))
                            .route("/{id}", web::delete().to(handlers::delete_event))
                            .route("/{id}/rsvp", web::post().to(handlers::rsvp))
                            .route("/{id}/attendees", web::get().to(handlers::list_attendees)),
                    ),
            );
        }
    }
}
