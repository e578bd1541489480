pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use crate::core::callable::{
    invoke, CallableEnvelope, CallableError, CallableRequest, ErrorCode,
};
pub use crate::core::relay::{SosRelay, MAX_RECIPIENTS};
pub use adapters::{DryRunGateway, TwilioClient};
pub use config::GatewayConfig;
pub use domain::model::{CallerIdentity, Contact, SendResult, SosRequest, SosResponse};
pub use utils::error::{GatewayError, RelayError, Result};
