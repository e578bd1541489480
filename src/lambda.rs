use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use sos_relay::utils::logger;
use sos_relay::{invoke, CallableRequest, GatewayConfig, SosRelay, SosResponse, TwilioClient};

async fn function_handler(
    relay: &SosRelay<TwilioClient>,
    event: LambdaEvent<CallableRequest>,
) -> Result<SosResponse, Error> {
    tracing::info!("Handling sendSOS invocation {}", event.context.request_id);

    // 驗證失敗以呼叫錯誤回傳；供應商失敗則是 {ok: false} 的正常回應
    let response = invoke(relay, event.payload).await?;

    tracing::info!("sendSOS invocation completed (ok: {})", response.is_ok());
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後所有呼叫共用
    let config = GatewayConfig::from_env().map_err(|e| {
        tracing::error!("❌ Gateway configuration failed: {}", e);
        e
    })?;
    let client = TwilioClient::from_config(&config)?;
    let relay = SosRelay::new(client, config.from_number.clone());
    let relay = &relay;

    run(service_fn(move |event: LambdaEvent<CallableRequest>| async move {
        function_handler(relay, event).await
    }))
    .await
}
