//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the ledger, payments and audits
//! - Caller identity middleware
//! - Error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use factoryflow_db::{
    ActivityRepository, IntegrityRepository, LedgerRepository, LedgerStore, PaymentRepository,
};
use factoryflow_shared::config::VerificationConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding every owner's books.
    pub store: Arc<dyn LedgerStore>,
    /// Integrity audit limits.
    pub verification: VerificationConfig,
}

impl AppState {
    /// Creates state over a store.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, verification: VerificationConfig) -> Self {
        Self {
            store,
            verification,
        }
    }

    /// Ledger repository over the shared store.
    #[must_use]
    pub fn ledger(&self) -> LedgerRepository {
        LedgerRepository::new(Arc::clone(&self.store))
    }

    /// Payment repository over the shared store.
    #[must_use]
    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(Arc::clone(&self.store))
    }

    /// Activity repository over the shared store.
    #[must_use]
    pub fn activity(&self) -> ActivityRepository {
        ActivityRepository::new(Arc::clone(&self.store))
    }

    /// Integrity repository over the shared store.
    #[must_use]
    pub fn integrity(&self) -> IntegrityRepository {
        IntegrityRepository::new(Arc::clone(&self.store), self.verification.clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
