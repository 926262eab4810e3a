pub mod analytics;
pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod motivation;
pub mod reports;
pub mod repository;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use repository::TrackerRepository;
pub use state::AppState;
pub use storage::load_data;
