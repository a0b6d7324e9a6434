use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

/// Keycloak role required on every resource route, reads included, when auth is enabled
pub const ADMIN_ROLE: &str = "maintenance-admin";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
    pub port: u16,
    pub keycloak_ui_id: String,
    pub keycloak_url: String,
    pub keycloak_realm: String,
    pub tests_running: bool,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load from .env file if available

        let db_url = match env::var("DB_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "{}://{}:{}@{}:{}/{}",
                env::var("DB_PREFIX").unwrap_or_else(|_| "mysql".to_string()),
                required("DB_USER")?,
                required("DB_PASSWORD")?,
                required("DB_HOST")?,
                env::var("DB_PORT").unwrap_or_else(|_| "3306".to_string()),
                required("DB_NAME")?,
            ),
        };

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            db_url,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "kai-maintenance-api".to_string()),
            deployment: required("DEPLOYMENT")
                .context("this can be local, dev, stage, or prod")?,
            port,
            // Authentication is disabled when no Keycloak server is configured
            keycloak_url: env::var("KEYCLOAK_URL").unwrap_or_default(),
            keycloak_realm: env::var("KEYCLOAK_REALM").unwrap_or_default(),
            keycloak_ui_id: env::var("KEYCLOAK_UI_ID").unwrap_or_default(),
            tests_running: false,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "kai-maintenance-api-test".to_string(),
            deployment: "test".to_string(),
            port: 0,
            keycloak_ui_id: "test-ui".to_string(),
            keycloak_url: String::new(),
            keycloak_realm: "test-realm".to_string(),
            tests_running: true,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::Config;
    use crate::routes::build_router;
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Fresh in-memory database with every migration applied.
    ///
    /// The pool is pinned to a single connection because each `SQLite`
    /// in-memory connection owns a separate database.
    pub async fn setup_test_db() -> DatabaseConnection {
        let config = Config::for_tests();
        let mut options = ConnectOptions::new(config.db_url);
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("Failed to connect to test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");

        db
    }

    pub async fn setup_test_app() -> Router {
        setup_test_app_with_db().await.0
    }

    pub async fn setup_test_app_with_db() -> (Router, DatabaseConnection) {
        let db = setup_test_db().await;
        let router = build_router(&db, &Config::for_tests()).expect("Failed to build router");
        (router, db)
    }
}
