#![doc(test(attr(deny(warnings))))]

//! Finance tracker keeps spending records and income sources behind a
//! versioned model with undo/redo, pinned records and filtered views, and
//! drives it from a small command language.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance tracker tracing initialized.");
    });
}
