use marquee_bridge::MessageFromBackend;

/// Handles an incoming configuration request (see
/// [`marquee_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}
