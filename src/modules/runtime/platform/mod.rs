//! Integration platform access
//!
//! Handlers talk to the platform through the [`Platform`] trait; the
//! production implementation is [`ComposioClient`].

mod composio;
mod error;
#[cfg(test)]
pub(crate) mod memory;
mod traits;

pub use composio::ComposioClient;
pub use error::PlatformError;
pub use traits::Platform;
