//! Bounded prompt cache in front of a `TextGenerator`.
//!
//! Successful answers are memoized by exact prompt text. Failures are never cached.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::{GenerationParams, LlmError, TextGenerator};

pub struct CachedGenerator {
    inner: Arc<dyn TextGenerator>,
    cache: Mutex<LruCache<String, String>>,
}

impl CachedGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }
}

#[async_trait]
impl TextGenerator for CachedGenerator {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        // The lock guard must be dropped before awaiting the inner call.
        let cached = self.cache.lock().get(prompt).cloned();
        if let Some(hit) = cached {
            debug!("Prompt cache hit ({} chars)", prompt.len());
            return Ok(hit);
        }

        let text = self.inner.generate(prompt, params).await?;
        self.cache.lock().put(prompt.to_string(), text.clone());
        Ok(text)
    }
}
