//! hearth-api: HTTP API layer
//!
//! This crate provides the HTTP layer including:
//! - REST endpoints via Axum
//! - Error serialization for the orchestrator result shapes
//! - Logging setup and the server binary
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                hearth-api                   │
//! ├─────────────────────────────────────────────┤
//! │  http/          - REST endpoints            │
//! │  observability/ - Structured logging        │
//! └─────────────────────────────────────────────┘
//! ```

pub mod http;
pub mod observability;
