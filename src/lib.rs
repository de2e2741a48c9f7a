pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod navigator;
pub mod render;
pub mod source;

pub use controller::Controller;
pub use error::FetchError;
pub use loader::{GameLoader, LoadOutcome};
pub use navigator::DateNavigator;
pub use render::Renderer;
pub use source::{GameSource, HttpGameSource};
