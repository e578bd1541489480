use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未設定 RUST_LOG 時使用的預設過濾規則
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "sos_relay=debug,info"
    } else {
        "sos_relay=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    // CLI 的標準輸出保留給回應 JSON，日誌寫到 stderr
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

pub fn init_lambda_logger() {
    // 時間戳記由 CloudWatch 提供，每筆日誌輸出為單行 JSON
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .json()
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_crate() {
        assert_eq!(default_directives(true), "sos_relay=debug,info");
        assert_eq!(default_directives(false), "sos_relay=info");
    }
}
