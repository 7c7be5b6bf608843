mod credentials;
mod settings;

pub use credentials::{CloudflareCredentials, Credentials};
pub use settings::{
    CloudflareConfig, HttpConfig, LLMConfig, LoggingConfig, PodcastConfig, Settings,
};
