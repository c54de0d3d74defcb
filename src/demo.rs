// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hooks for the bundled demo server.
//!
//! Two accounts can log in, `admin/admin` and `test/test`. Each token carries
//! a role claim and only the `admin` role passes the authorizer, so `test`
//! can log in but is refused on every protected route.

use crate::auth::{JwtAuthConfig, LoginCredentials, Role, RoleAuthorizer, RolePayload};

pub fn authenticate(credentials: &LoginCredentials) -> Option<String> {
    match (credentials.username.as_str(), credentials.password.as_str()) {
        ("admin", "admin") | ("test", "test") => Some(credentials.username.clone()),
        _ => None,
    }
}

pub fn role_of(identity: &str) -> Role {
    if identity == "admin" {
        Role::Admin
    } else {
        Role::User
    }
}

/// Attach the demo authenticator, role payload and admin-only authorizer.
pub fn with_demo_hooks(config: JwtAuthConfig) -> JwtAuthConfig {
    config
        .with_authenticator(authenticate)
        .with_payload(RolePayload(role_of))
        .with_authorizer(RoleAuthorizer::new(Role::Admin))
}
