pub mod common;
pub mod pending_file;
pub mod registry;
pub mod render_context;
pub mod request;

pub use crate::domain::DomainError;
pub use pending_file::PendingFile;
pub use registry::FileRegistry;
pub use render_context::RenderContext;
pub use request::{ProjectRequest, ProjectRequestBuilder};
