pub mod deploy_handlers;
pub mod render_handlers;
pub mod resume_handlers;
pub mod system_handlers;

pub use deploy_handlers::*;
pub use render_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;
