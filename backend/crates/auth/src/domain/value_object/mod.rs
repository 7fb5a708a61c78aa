pub mod email;
pub mod user_id;

pub use email::Email;
pub use user_id::UserId;
