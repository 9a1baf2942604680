// Services layer - domain logic on top of the stores
pub mod access_service;
pub mod permission_service;
pub mod recorder_service;
pub mod session_tracker;
pub mod token_service;

pub use access_service::AccessService;
pub use permission_service::PermissionResolver;
pub use recorder_service::SecurityRecorder;
pub use session_tracker::SessionTracker;
pub use token_service::TokenService;
