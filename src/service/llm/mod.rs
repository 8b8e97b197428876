pub mod openai;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// The completion call is treated as an opaque text-in, text-out function: no
/// structure is guaranteed in the output, and callers are expected to parse it
/// tolerantly.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Request a single completion for a system directive and user prompt at
    /// the given sampling temperature.
    async fn complete(&self, system_directive: &str, prompt: &str, temperature: f32) -> Res<String>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
