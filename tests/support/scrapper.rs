use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use tickerbot::adapter::inbound::http;
use tickerbot::adapter::outbound::http::HttpConfig;
use tickerbot::adapter::outbound::scrapper::{ScrapperClient, ScrapperConfig};
use tickerbot::application::tracker::TrackerService;
use tickerbot::domain::QuoteAsset;
use tickerbot::testkit::exchange::ScriptedGateway;
use tickerbot::testkit::tracker::service_with;

/// A scrapper REST API served on an ephemeral port.
pub struct RunningScrapper {
    pub addr: SocketAddr,
    pub service: Arc<TrackerService>,
    pub gateway: ScriptedGateway,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RunningScrapper {
    /// Serve a tracker over `gateway`.
    pub async fn start(gateway: ScriptedGateway) -> Self {
        let (service, gateway) = service_with(gateway).await;
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (shutdown, rx) = watch::channel(false);
        let app = http::router(service.clone());
        let handle = tokio::spawn(async move {
            http::serve(listener, app, rx).await.expect("serve");
        });

        Self {
            addr,
            service,
            gateway,
            shutdown,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, http::API_PREFIX)
    }

    /// A client pointed at this server, without retries.
    pub fn client(&self) -> ScrapperClient {
        let config = ScrapperConfig {
            base_url: self.base_url(),
            http: HttpConfig {
                retry_max_attempts: 1,
                ..HttpConfig::default()
            },
        };
        ScrapperClient::from_config(&config, QuoteAsset::default()).expect("client")
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        self.handle.await.expect("server task");
    }
}
