pub mod fence_sanitizer;
pub mod http_client;
