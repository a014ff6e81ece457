pub mod app;
pub mod bria;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod presenter;
pub mod session;

pub use app::{ConceptApp, GenerationOutcome, Presenter};
pub use bria::{BriaClient, GenerationClient, ImageFetcher};
pub use config::{AuthScheme, BriaConfig, Config, FetchConfig};
pub use error::{ConceptifyError, Result};
pub use models::*;
pub use presenter::ConsolePresenter;
pub use session::SessionState;
