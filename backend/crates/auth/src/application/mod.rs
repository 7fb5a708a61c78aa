//! Application Layer - Use Cases

pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod resolve_session;

pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
