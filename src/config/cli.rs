use crate::core::callable::CallableRequest;
use crate::core::CallerIdentity;
use crate::utils::error::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sos-relay")]
#[command(about = "Relay an SOS text message to emergency contacts over SMS")]
pub struct CliConfig {
    #[arg(
        long,
        default_value = "-",
        help = "Callable request JSON ({\"auth\": ..., \"data\": ...}), '-' reads stdin"
    )]
    pub request: String,

    #[arg(long, help = "Caller uid to use when the request has no auth")]
    pub uid: Option<String>,

    #[arg(long, help = "Configuration store file (overrides SOS_RELAY_CONFIG)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log messages instead of sending them")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 讀取並解析請求，必要時補上 --uid 指定的呼叫者
    pub fn load_request(&self) -> Result<CallableRequest> {
        let raw = if self.request == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            std::fs::read_to_string(&self.request)?
        };

        self.parse_request(&raw)
    }

    pub fn parse_request(&self, raw: &str) -> Result<CallableRequest> {
        let mut request: CallableRequest = serde_json::from_str(raw)?;
        if request.auth.is_none() {
            request.auth = self.uid.clone().map(CallerIdentity::new);
        }
        Ok(request)
    }
}
