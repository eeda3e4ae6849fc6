//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Library code only emits events; installing a subscriber is
//! left to the host binary or test.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup, shutdown and final catalog size (`info`)
//! - **Client and catalog milestones**: client ready, catalog published (`info`)
//! - **Setup failures**: client or catalog load failures (`error`)
//! - **Ignored requests and unknown products** (`warn`)
//! - **Client calls and platform request payloads** (`debug`)
//!
//! ## Usage Examples
//!
//! ```bash
//! RUST_LOG=info cargo test
//! RUST_LOG=appgallery_store=debug cargo test
//! ```
//!
//! ## Example Output
//!
//! ```text
//! INFO Store actor started store=AppGallery
//! INFO Catalog requested ids=["gems_100", "vip"]
//! INFO Platform client ready
//! INFO Catalog published products=2 owned=0
//! INFO purchase{product_id="gems_100"}: Purchase succeeded product_id=gems_100 order_id=order-1
//! ```

/// Installs the global subscriber. Panics if one is already installed;
/// use [`try_setup_tracing`] where that can happen.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
