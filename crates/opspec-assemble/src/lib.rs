pub mod assemble;
pub mod config;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use assemble::{generate, generate_with};
pub use config::{AppConfig, FunctionSig, GlobalDecl, InitialValue, Scenario};
pub use error::AssembleError;
pub use registry::{BuilderFn, BuilderRegistry};
