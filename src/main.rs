use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use membership_service::config::Config;
use membership_service::db::{create_pool, run_migrations};
use membership_service::routes::configure_routes;
use membership_service::security::jwt;
use membership_service::services::RoleResolver;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting membership-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Identity provider public key; tokens are verified, never issued
    jwt::initialize_key(&config.auth.public_key_pem)
        .expect("Failed to initialize identity provider public key");
    tracing::info!("Identity provider public key loaded");

    // Create database connection pool
    let db_pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool created with {} max connections",
        config.database.max_connections
    );

    run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let role_resolver = RoleResolver::new(&config.org.admin_emails);
    tracing::info!(
        "Role resolver configured with {} admin email(s)",
        config.org.admin_emails.len()
    );

    let bind_addr = (config.app.host.clone(), config.app.port);
    let allowed_origins =
        std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

    tracing::info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(role_resolver.clone()))
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
