// Service exports
pub mod appwrite;
pub mod cache;
pub mod inference;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheManager, CacheKey, CacheError};
pub use inference::{GeminiClient, InferenceBackend, InferenceCall, InferenceError};
