use crate::common::state::AppState;
use crate::config::ADMIN_ROLE;
use axum_keycloak_auth::{PassthroughMode, layer::KeycloakAuthLayer};
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Role {
    Administrator,
    Unknown(String),
}

impl axum_keycloak_auth::role::Role for Role {}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Administrator => f.write_str(ADMIN_ROLE),
            Role::Unknown(unknown) => f.write_fmt(format_args!("Unknown role: {unknown}")),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == ADMIN_ROLE {
            Role::Administrator
        } else {
            Role::Unknown(value)
        }
    }
}

/// Wraps a resource router in the Keycloak layer when authentication is configured
pub fn protect(router: OpenApiRouter, state: &AppState, resource_plural: &str) -> OpenApiRouter {
    if let Some(instance) = state.keycloak_auth_instance.clone() {
        router.layer(
            KeycloakAuthLayer::<Role>::builder()
                .instance(instance)
                .passthrough_mode(PassthroughMode::Block)
                .persist_raw_claims(false)
                .expected_audiences(vec![String::from("account")])
                .required_roles(vec![Role::Administrator])
                .build(),
        )
    } else {
        if !state.config.tests_running {
            tracing::warn!("Routes of the {resource_plural} router are not protected");
        }
        router
    }
}
