// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{handlers, middleware::require_auth, ErrorBody},
    models::{LoginRequest, TokenResponse},
    state::AppState,
};

pub mod users;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/hello", get(users::hello))
        .route("/refresh_token", get(handlers::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_auth,
        ));

    let routes = Router::new()
        .route("/login", post(handlers::login))
        .nest("/auth", protected)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::login, handlers::refresh, users::hello),
    components(schemas(LoginRequest, TokenResponse, ErrorBody, users::HelloResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Login and token refresh"),
        (name = "Users", description = "Authenticated user endpoints")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
