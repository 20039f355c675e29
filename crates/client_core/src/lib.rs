//! Chart service client: transport seam, gateway and failure normalization.

pub mod error;
pub mod gateway;
pub mod transport;

pub use error::{FallbackMessages, GatewayFailure};
pub use gateway::{ApiGateway, Outcome};
pub use transport::{HttpReply, HttpTransport, ReqwestTransport, TransportError};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
