// Adapters layer: concrete implementations for external systems (http, clock, webhooks).

pub mod daily;
pub mod holiday;
pub mod http;
pub mod system;
pub mod wecom;
