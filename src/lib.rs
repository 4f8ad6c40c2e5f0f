//! Book catalog application library
//!
//! Hosts the feature modules (currently `books`, with its record validator)
//! and the bootstrap that runs them behind the HTTP server.

pub mod modules;

pub use modules::books::validation::{validate_book, validate_field, ValidationResult};

use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every application module
pub fn registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the module lifecycle around the HTTP server until shutdown
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = registry(settings);
    let ctx = InitCtx { settings };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module startup failed")?;

    let served = catalog_http::start_server(&registry, settings).await;

    registry.stop_all().await.context("module shutdown failed")?;
    served
}
