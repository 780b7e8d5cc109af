#[path = "../crates/sdk-types/src/lib.rs"]
pub mod types;
#[path = "../crates/core/src/lib.rs"]
pub mod core;
#[path = "../crates/streaming-sse/src/lib.rs"]
pub mod streaming_sse;
#[path = "../crates/transports/reqwest/src/lib.rs"]
pub mod transport_reqwest;

#[path = "../crates/providers/deepseek/src/lib.rs"]
pub mod provider_deepseek;

pub mod transports {
    pub use crate::transport_reqwest as reqwest;
}

pub mod providers {
    pub use crate::provider_deepseek as deepseek;
}

pub(crate) use crate::core as sdk_core;
pub(crate) use crate::provider_deepseek as sdk_provider_deepseek;
pub(crate) use crate::streaming_sse as sdk_streaming_sse;
pub(crate) use crate::transport_reqwest as reqwest_transport;
pub(crate) use crate::types as sdk_types;
