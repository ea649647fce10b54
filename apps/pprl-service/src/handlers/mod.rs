// [apps/pprl-service/src/handlers/mod.rs]
//! One handler module per exposed operation.

/// `GET /healthz`.
pub mod health;
/// `POST /mask`.
pub mod mask;
/// `POST /match`.
pub mod match_handler;
/// `POST /transform`.
pub mod transform;
