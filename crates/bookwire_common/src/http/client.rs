// --- File: crates/bookwire_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use crate::error::FailureKind;

/// Default timeout for outbound HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Tags a transport error with a [`FailureKind`].
///
/// Non-success statuses never reach this function as errors because callers
/// inspect `Response::status()` themselves, but an error produced by
/// `error_for_status` is still recognised as [`FailureKind::RemoteError`].
pub fn classify_transport_error(err: &ReqwestError) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    if err.status().is_some() {
        return FailureKind::RemoteError;
    }
    if err.is_builder() {
        return FailureKind::Other;
    }

    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionRefused => return FailureKind::ConnectionRefused,
                io::ErrorKind::TimedOut => return FailureKind::Timeout,
                _ => {}
            }
        }
        if is_dns_message(&cause.to_string()) {
            return FailureKind::DnsFailure;
        }
        source = cause.source();
    }

    if err.is_connect() || err.is_request() || err.is_body() || err.is_decode() {
        return FailureKind::NoResponse;
    }
    FailureKind::Other
}

fn is_dns_message(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    text.contains("dns error")
        || text.contains("failed to lookup address")
        || text.contains("name or service not known")
        || text.contains("nodename nor servname")
        || text.contains("no such host")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = create_client(1, true).unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();
        assert_eq!(classify_transport_error(&err), FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = create_client(5, true).unwrap();
        let err = client
            .get(format!("http://{addr}/hook"))
            .send()
            .await
            .unwrap_err();
        assert_eq!(classify_transport_error(&err), FailureKind::ConnectionRefused);
    }

    #[tokio::test]
    async fn test_invalid_url_is_other() {
        let client = create_client(5, true).unwrap();
        let err = client.get("not a url").send().await.unwrap_err();
        assert_eq!(classify_transport_error(&err), FailureKind::Other);
    }

    #[tokio::test]
    async fn test_error_for_status_is_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = create_client(5, true).unwrap();
        let err = client
            .get(server.uri())
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();
        assert_eq!(classify_transport_error(&err), FailureKind::RemoteError);
    }

    #[test]
    fn test_dns_messages() {
        assert!(is_dns_message("dns error: failed to lookup address information"));
        assert!(is_dns_message("Name or service not known"));
        assert!(!is_dns_message("connection reset by peer"));
    }
}
