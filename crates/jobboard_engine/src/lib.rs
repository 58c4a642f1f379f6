//! Job board engine: API client, response normalization and request execution.
mod client;
mod credentials;
mod engine;
mod normalize;
mod types;

pub use client::{
    AuthExpiredHandler, ClientError, ClientSettings, JobApi, ReqwestJobApi, DEFAULT_API_BASE_URL,
};
pub use credentials::{CredentialError, FileTokenStore, MemoryTokenStore, TokenStore};
pub use engine::EngineHandle;
pub use normalize::{
    normalize_page, normalize_page_value, normalize_record, normalize_record_value,
    NormalizeError,
};
pub use types::EngineEvent;
