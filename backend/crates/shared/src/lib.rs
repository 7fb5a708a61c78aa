//! Shared Kernel - Domain-crossing minimal core
//!
//! Contains the smallest common vocabulary shared by every backend crate:
//! - Unified error type and result alias
//! - Error classification with HTTP status mapping
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
