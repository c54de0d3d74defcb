// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational JWT Auth - stateless JWT authentication for Axum
//!
//! Issues, verifies and refreshes signed tokens, and guards routes with a
//! configurable authentication and authorization pipeline.
//!
//! ## Modules
//!
//! - `auth` - Token codec, signer, lookup, middleware and lifecycle handlers
//! - `api` - HTTP router and OpenAPI document
//! - `config` - Environment configuration for the server binary
//! - `demo` - Hooks used by the bundled demo server

pub mod api;
pub mod auth;
pub mod config;
pub mod demo;
pub mod models;
pub mod state;
