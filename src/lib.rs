//! folio application library
//!
//! Authors and books, their repositories and resolvers, and the HTTP modules
//! exposing them.

pub mod error;
pub mod modules;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use folio_kernel::settings::{DatabaseKind, Settings};
use folio_kernel::{InitCtx, ModuleRegistry};

use storage::MemoryLibraryStore;

/// Re-export commonly used types
pub use error::{ResolverError, ResolverResult, ValidationError};
pub use modules::*;

/// Build a registry holding every module, wired to the configured store.
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let store = match settings.database.kind {
        DatabaseKind::Memory => Arc::new(MemoryLibraryStore::new(settings.database.name.clone())),
    };
    tracing::info!(database = store.name(), kind = ?settings.database.kind, "storage ready");

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store)?;
    Ok(registry)
}

/// Run the modules and the HTTP server until Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = folio_http::start_server(&registry, &settings, folio_http::shutdown_signal()).await;
    registry.stop_all().await?;
    served
}
