// Adapters 層：SMS 閘道的實作

pub mod dry_run;
pub mod twilio;

pub use dry_run::DryRunGateway;
pub use twilio::TwilioClient;
