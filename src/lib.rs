//! # Focus City
//!
//! A focus timer that rewards every completed session with a building placed on an
//! isometric city board.
//!
//! ## Features
//! - Focus countdown with start/pause/reset and a selectable building reward
//! - Isometric 2:1 projection of the city board with back-to-front depth sorting
//! - Pannable and zoomable board view (drag, pinch, scroll wheel)
//! - Building list persisted as JSON in a key-value store

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod projection;
mod reward;
mod storage;
mod timer;
mod types;
mod ui;
mod viewport;

// Re-export public types and functions
pub use projection::*;
pub use reward::*;
pub use storage::*;
pub use timer::*;
pub use types::*;
pub use ui::{AppSettings, BoardViewState, CityApp, CityScreenState, FocusScreenState, Tab};
pub use viewport::*;

/// Runs the focus city application with default settings.
///
/// Buildings are stored in the platform's application data directory. When that
/// directory cannot be determined the city lives in memory for this session only.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use focus_city::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Focus City",
        options,
        Box::new(|cc| {
            let repository: Box<dyn BuildingRepository> = match eframe::storage_dir("Focus City") {
                Some(dir) => {
                    log::info!("Storing buildings in {}", dir.display());
                    Box::new(KeyValueRepository::new(FileStore::new(dir)))
                }
                None => {
                    log::warn!("No storage directory available, buildings will not persist");
                    Box::new(KeyValueRepository::new(MemoryStore::new()))
                }
            };
            let settings = CityApp::restore_settings(cc.storage);
            Ok(Box::new(CityApp::new(repository, settings)))
        }),
    )
}
