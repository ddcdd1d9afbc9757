use reqwest::Client;
use std::time::Duration;

/// HTTP client for the transformation service.
///
/// `timeout_secs = None` leaves the overall request unbounded: a generation
/// runs until the service answers or the connection drops.
pub fn build_transform_client(timeout_secs: Option<u64>) -> Client {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60));

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().unwrap_or_else(|_| Client::new())
}
