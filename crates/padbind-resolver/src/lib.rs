mod commit;
mod error;
mod resolver;
mod session;

pub use commit::{commit_capture, Bound};
pub use error::{ResolverError, Result};
pub use resolver::InputBindingResolver;
pub use session::CaptureStatus;
