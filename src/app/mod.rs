// Application layer - Use case interactors

pub mod container;
pub mod media_interactor;
pub mod validation_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer, DependencyStatus};
pub use media_interactor::MediaInteractor;
pub use validation_interactor::ValidationOrchestrator;
