#[cfg(feature = "gemini")]
pub mod client;
pub mod types;

#[cfg(feature = "gemini")]
pub use client::*;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;

/// A hosted text-completion endpoint.
///
/// Implementations own their credentials and transport; a call either yields
/// the model's raw text or an error describing why it could not.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String>;
}

#[async_trait]
impl<M: CompletionModel + ?Sized> CompletionModel for &M {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String> {
        (**self).complete(request).await
    }
}
