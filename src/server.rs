use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::config::PlannerConfig;
use crate::service::AiService;
use crate::skeleton::Skeleton;
use crate::transport::tcp::{TcpTransport, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE};
use crate::transport::Codec;

/// Settings for the TCP planner service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub codec: Codec,
    pub timeout: Duration,
    pub max_message_size: u32,
    pub planner: PlannerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            codec: Codec::Json,
            timeout: DEFAULT_TIMEOUT,
            max_message_size: MAX_MESSAGE_SIZE,
            planner: PlannerConfig::default(),
        }
    }
}

/// Bind and serve forever.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    log::info!(
        "planner listening on {} ({} frames)",
        listener.local_addr()?,
        config.codec
    );
    serve_listener(listener, config).await
}

/// Accept connections on an already bound listener. Every connection gets
/// its own task and its own engine; nothing is shared between them.
pub async fn serve_listener(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        log::info!("client connected from {}", addr);
        let transport = TcpTransport::with_config(
            stream,
            config.codec,
            config.timeout,
            config.max_message_size,
        );
        let engine = AiService::new(config.planner);
        tokio::spawn(async move {
            let mut skeleton = Skeleton::new(engine, transport);
            match skeleton.run().await {
                Ok(()) => log::info!("client {} done after {} moves", addr, skeleton.served()),
                Err(e) => log::warn!("client {} dropped: {}", addr, e),
            }
        });
    }
}
