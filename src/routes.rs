use crate::common::state::AppState;
use crate::config::Config;
use crate::{calibration, engineering, inventory, overhaul, production, quality_control};
use anyhow::{Context, Result};
use axum::Router;
use axum_keycloak_auth::{Url, instance::KeycloakAuthInstance, instance::KeycloakConfig};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Result<Router> {
    #[derive(OpenApi)]
    #[openapi(
        modifiers(&SecurityAddon),
        security(
            ("bearerAuth" = [])
        ),
        tags(
            (name = "production", description = "Production runs (PRD)"),
            (name = "overhaul", description = "Overhaul jobs (OVH)"),
            (name = "engineering", description = "Engineering projects (RKY)"),
            (name = "inventory", description = "Inventory items, link target of calibration codes (KAL)"),
            (name = "calibration", description = "Calibration schedule"),
            (name = "quality_control", description = "Quality-control entries linked to department rows by frontend code")
        )
    )]
    struct ApiDoc;

    struct SecurityAddon;

    impl utoipa::Modify for SecurityAddon {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            if let Some(components) = openapi.components.as_mut() {
                components.add_security_scheme(
                    "bearerAuth",
                    utoipa::openapi::security::SecurityScheme::Http(
                        utoipa::openapi::security::HttpBuilder::new()
                            .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                            .bearer_format("JWT")
                            .build(),
                    ),
                );
            }
        }
    }

    let keycloak_instance: Option<Arc<KeycloakAuthInstance>> = if config.keycloak_url.is_empty() {
        None
    } else {
        let server = Url::parse(&config.keycloak_url)
            .with_context(|| format!("KEYCLOAK_URL '{}' is not a valid URL", config.keycloak_url))?;
        Some(Arc::new(KeycloakAuthInstance::new(
            KeycloakConfig::builder()
                .server(server)
                .realm(String::from(&config.keycloak_realm))
                .build(),
        )))
    };

    let app_state: AppState = AppState::new(db.clone(), config.clone(), keycloak_instance);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state))
        .nest("/api/production", production::views::router(&app_state))
        .nest("/api/overhaul", overhaul::views::router(&app_state))
        .nest("/api/engineering", engineering::views::router(&app_state))
        .nest("/api/inventory", inventory::views::router(&app_state))
        .nest("/api/calibration", calibration::views::router(&app_state))
        .nest(
            "/api/quality_control",
            quality_control::views::router(&app_state),
        )
        .split_for_parts();

    Ok(router.merge(Scalar::with_url("/api/docs", api)))
}
