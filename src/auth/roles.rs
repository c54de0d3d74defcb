// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role claim and role-based authorization.

use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::claims::AuthenticatedUser;
use super::hooks::{Authorizer, PayloadProvider};

/// Claim carrying the role.
pub const ROLE_CLAIM: &str = "role";

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access to all protected routes
/// - `User` - Access to routes requiring `User`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::User, Role::User) => true,
            _ => false,
        }
    }

    /// Parse role from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// Read the role claim. Absent or unknown roles yield `None`.
    pub fn of(user: &AuthenticatedUser) -> Option<Role> {
        user.claims
            .get(ROLE_CLAIM)
            .and_then(Value::as_str)
            .and_then(Role::from_str)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Admits users whose role claim grants `required`.
///
/// Tokens without a recognised role claim are rejected.
#[derive(Debug, Clone, Copy)]
pub struct RoleAuthorizer {
    pub required: Role,
}

impl RoleAuthorizer {
    pub fn new(required: Role) -> Self {
        Self { required }
    }
}

impl Authorizer for RoleAuthorizer {
    fn authorize(&self, user: &AuthenticatedUser, _request: &Parts) -> bool {
        Role::of(user).is_some_and(|role| role.has_privilege(self.required))
    }
}

/// Payload provider writing a role claim chosen per identity.
pub struct RolePayload<F>(pub F);

impl<F> PayloadProvider for RolePayload<F>
where
    F: Fn(&str) -> Role + Send + Sync,
{
    fn payload(&self, identity: &str) -> Map<String, Value> {
        let mut extra = Map::new();
        extra.insert(
            ROLE_CLAIM.to_string(),
            Value::String((self.0)(identity).to_string()),
        );
        extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ClaimSet;
    use axum::http::Request;
    use serde_json::json;

    fn user_with(claims: Value) -> AuthenticatedUser {
        let Value::Object(map) = claims else {
            panic!("claims must be an object");
        };
        AuthenticatedUser::from_claims(ClaimSet::from(map)).unwrap()
    }

    fn parts() -> Parts {
        Request::builder().body(()).unwrap().into_parts().0
    }

    #[test]
    fn admin_has_all_privileges() {
        assert!(Role::Admin.has_privilege(Role::Admin));
        assert!(Role::Admin.has_privilege(Role::User));
    }

    #[test]
    fn user_only_has_user_privilege() {
        assert!(!Role::User.has_privilege(Role::Admin));
        assert!(Role::User.has_privilege(Role::User));
    }

    #[test]
    fn from_str_parses_correctly() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("User"), Some(Role::User));
        assert_eq!(Role::from_str("unknown"), None);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn authorizer_reads_role_claim() {
        let admin_only = RoleAuthorizer::new(Role::Admin);
        let any_user = RoleAuthorizer::new(Role::User);

        let admin = user_with(json!({"id": "admin", "role": "admin"}));
        let user = user_with(json!({"id": "test", "role": "user"}));
        let no_role = user_with(json!({"id": "anon"}));
        let bad_role = user_with(json!({"id": "anon", "role": 1}));

        assert!(admin_only.authorize(&admin, &parts()));
        assert!(!admin_only.authorize(&user, &parts()));
        assert!(any_user.authorize(&user, &parts()));
        assert!(any_user.authorize(&admin, &parts()));
        assert!(!any_user.authorize(&no_role, &parts()));
        assert!(!any_user.authorize(&bad_role, &parts()));
    }

    #[test]
    fn role_payload_writes_claim() {
        let payload = RolePayload(|identity: &str| {
            if identity == "admin" {
                Role::Admin
            } else {
                Role::User
            }
        });

        assert_eq!(payload.payload("admin")[ROLE_CLAIM], json!("admin"));
        assert_eq!(payload.payload("test")[ROLE_CLAIM], json!("user"));
    }
}
