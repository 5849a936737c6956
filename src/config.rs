use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub org: OrgConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub env: String,

    #[serde(default = "default_app_host")]
    pub host: String,

    #[serde(default = "default_app_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// PEM-encoded RSA public key of the external identity provider.
    /// Tokens are verified only; this service never issues them.
    pub public_key_pem: String,
}

/// Organization-level policy: which domain members must register with,
/// and which emails are granted the admin role at registration.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgConfig {
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    #[serde(default)]
    pub admin_emails: Vec<String>,
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_email_domain() -> String {
    "wayne.edu".to_string()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| default_app_env()),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| default_app_port().to_string())
                .parse()
                .unwrap_or(default_app_port()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| default_db_max_connections().to_string())
                .parse()
                .unwrap_or(default_db_max_connections()),
        };

        let auth = AuthConfig {
            public_key_pem: match env::var("JWT_PUBLIC_KEY_FILE") {
                Ok(path) => std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?,
                Err(_) => env::var("JWT_PUBLIC_KEY")
                    .map_err(|_| anyhow::anyhow!("JWT_PUBLIC_KEY must be set"))?,
            },
        };

        let org = OrgConfig {
            email_domain: env::var("ORG_EMAIL_DOMAIN")
                .unwrap_or_else(|_| default_email_domain()),
            admin_emails: env::var("ADMIN_EMAILS")
                .map(|raw| parse_email_list(&raw))
                .unwrap_or_default(),
        };

        Ok(Config {
            app,
            database,
            auth,
            org,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

/// ADMIN_EMAILS is a comma-separated list; entries are trimmed and
/// blanks are skipped.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_env(), "development");
        assert_eq!(default_app_host(), "0.0.0.0");
        assert_eq!(default_app_port(), 8080);
        assert_eq!(default_db_max_connections(), 20);
        assert_eq!(default_email_domain(), "wayne.edu");
    }

    #[test]
    fn test_parse_email_list() {
        let emails = parse_email_list("a@wayne.edu, b@wayne.edu,,  c@wayne.edu ");
        assert_eq!(
            emails,
            vec!["a@wayne.edu", "b@wayne.edu", "c@wayne.edu"]
        );
    }

    #[test]
    fn test_parse_email_list_empty() {
        assert!(parse_email_list("").is_empty());
        assert!(parse_email_list(" , ").is_empty());
    }
}
