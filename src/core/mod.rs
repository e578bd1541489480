pub mod callable;
pub mod relay;

pub use crate::domain::model::{CallerIdentity, Contact, SendResult, SosRequest, SosResponse};
pub use crate::domain::ports::{SentMessage, SmsGateway};
pub use crate::utils::error::Result;
