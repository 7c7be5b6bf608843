pub mod cloudflare;
pub mod error;
pub mod inference;
pub mod llm;
pub mod prompts;
pub mod slug;

pub use error::{ClientError, ClientResult};
