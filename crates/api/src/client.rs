//! The API gateway client.
//!
//! [`Client`] builds endpoint URLs from an API root and a relative path,
//! issues authenticated GET requests bounded by a fixed timeout, and
//! either decodes the response as JSON or streams the bytes through
//! unmodified. All construction is explicit; there is no process-wide
//! state.

use std::io::Write;
use std::time::Duration;

use reqwest::header;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Every request is bounded by this deadline; expiry surfaces as
/// [`Error::Network`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// User agent sent on every request.
const USER_AGENT: &str = concat!("sntr rust/", env!("CARGO_PKG_VERSION"));

/// Per-invocation output options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Dump request and response headers to stderr around every call.
    pub debug: bool,
    /// Stream response bodies to stdout verbatim instead of decoding them.
    pub raw_json: bool,
}

/// An authenticated gateway to a single API root.
///
/// # Examples
///
/// ```no_run
/// use sntr_api::{Client, Options};
///
/// # async fn example() -> sntr_api::Result<()> {
/// let client = Client::new(
///     "https://sentry.io/api/0",
///     "Bearer d0a9f1e3c5...",
///     Options::default(),
/// )?;
/// let identity = client.get_single("").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    api_root: String,
    auth_header: String,
    options: Options,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the given API root and authorization header.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_root: impl Into<String>,
        auth_header: impl Into<String>,
        options: Options,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_root: api_root.into(),
            auth_header: auth_header.into(),
            options,
            http,
        })
    }

    /// Builds the full endpoint URL for a relative path.
    ///
    /// The result always carries exactly one `/` between root and path and
    /// exactly one trailing `/` — unless the path contains a query string,
    /// in which case no trailing slash is appended after it.
    #[must_use]
    pub fn endpoint_for(&self, path: &str) -> String {
        let mut endpoint = String::with_capacity(self.api_root.len() + path.len() + 2);
        endpoint.push_str(&self.api_root);
        if !path.starts_with('/') {
            endpoint.push('/');
        }
        endpoint.push_str(path);
        if path.contains('?') {
            return endpoint;
        }
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        endpoint
    }

    /// Fetches a singleton endpoint, decoding the body as a JSON object.
    ///
    /// Returns `Ok(None)` when raw-JSON mode streamed the body to stdout
    /// instead of decoding it.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on connection failure or timeout,
    /// [`Error::RequestFailed`] on a non-200 status, and [`Error::Decode`]
    /// if the body is not a JSON object.
    pub async fn get_single(&self, path: &str) -> Result<Option<Map<String, Value>>> {
        if self.options.raw_json {
            self.passthrough(path).await?;
            return Ok(None);
        }
        let body = self.fetch(path).await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// Fetches a collection endpoint, decoding the body as an array of
    /// JSON objects.
    ///
    /// Returns `Ok(None)` when raw-JSON mode streamed the body to stdout
    /// instead of decoding it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_single`], with [`Error::Decode`] if the body is
    /// not an array of objects.
    pub async fn get_multiple(&self, path: &str) -> Result<Option<Vec<Map<String, Value>>>> {
        if self.options.raw_json {
            self.passthrough(path).await?;
            return Ok(None);
        }
        let body = self.fetch(path).await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// Fetches an endpoint and returns the response bytes untouched.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on connection failure or timeout and
    /// [`Error::RequestFailed`] on a non-200 status.
    pub async fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        self.fetch(path).await
    }

    /// Copies the response body to stdout byte for byte.
    async fn passthrough(&self, path: &str) -> Result<()> {
        let body = self.fetch(path).await?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&body)?;
        stdout.flush()?;
        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let endpoint = self.endpoint_for(path);
        debug!(%endpoint, "GET");

        let request = self
            .http
            .get(&endpoint)
            .header(header::AUTHORIZATION, self.auth_header.as_str())
            .header(header::USER_AGENT, USER_AGENT)
            .build()?;
        if self.options.debug {
            dump_request(&request);
        }

        let response = self.http.execute(request).await?;
        if self.options.debug {
            dump_response(&response);
        }

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Writes the request line and headers to stderr. Bodies are never dumped,
/// and the authorization value is redacted.
fn dump_request(request: &reqwest::Request) {
    let mut dump = format!("{} {} HTTP/1.1\r\n", request.method(), request.url());
    for (name, value) in request.headers() {
        if name == header::AUTHORIZATION {
            dump.push_str("authorization: Bearer ***\r\n");
            continue;
        }
        let value = value.to_str().unwrap_or("<binary>");
        dump.push_str(&format!("{name}: {value}\r\n"));
    }
    dump.push_str("\r\n");
    eprint!("{dump}");
}

/// Writes the status line and headers to stderr; the body is left on the
/// response untouched.
fn dump_response(response: &reqwest::Response) {
    let mut dump = format!("{:?} {}\r\n", response.version(), response.status());
    for (name, value) in response.headers() {
        let value = value.to_str().unwrap_or("<binary>");
        dump.push_str(&format!("{name}: {value}\r\n"));
    }
    dump.push_str("\r\n");
    eprint!("{dump}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn client(api_root: &str) -> Client {
        Client::new(api_root, "Bearer test-token", Options::default()).unwrap()
    }

    #[test]
    fn endpoint_gets_exactly_one_trailing_slash() {
        let client = client("https://sentry.io/api/0");
        assert_eq!(
            client.endpoint_for("organizations"),
            "https://sentry.io/api/0/organizations/"
        );
        assert_eq!(
            client.endpoint_for("organizations/"),
            "https://sentry.io/api/0/organizations/"
        );
    }

    #[test]
    fn endpoint_does_not_duplicate_leading_slash() {
        let client = client("https://sentry.io/api/0");
        assert_eq!(
            client.endpoint_for("/organizations"),
            "https://sentry.io/api/0/organizations/"
        );
    }

    #[test]
    fn endpoint_for_empty_path_is_the_root() {
        let client = client("https://sentry.io/api/0");
        assert_eq!(client.endpoint_for(""), "https://sentry.io/api/0/");
    }

    #[test]
    fn endpoint_with_query_string_gets_no_trailing_slash() {
        let client = client("https://sentry.io/api/0");
        assert_eq!(
            client.endpoint_for("organizations/acme/eventsv2/?query=is%3Aunresolved&sort=-timestamp"),
            "https://sentry.io/api/0/organizations/acme/eventsv2/?query=is%3Aunresolved&sort=-timestamp"
        );
    }

    fn serve_once(
        response: tiny_http::Response<std::io::Cursor<Vec<u8>>>,
    ) -> (String, thread::JoinHandle<Vec<(String, String)>>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            let headers = request
                .headers()
                .iter()
                .map(|h| (h.field.as_str().as_str().to_ascii_lowercase(), h.value.as_str().to_string()))
                .collect();
            request.respond(response).unwrap();
            headers
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn get_multiple_decodes_an_array_of_objects() {
        let (root, handle) = serve_once(tiny_http::Response::from_string(
            r#"[{"slug": "zeta"}, {"slug": "alpha"}]"#,
        ));

        let orgs = client(&root).get_multiple("organizations").await.unwrap().unwrap();
        handle.join().unwrap();

        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].get("slug").unwrap(), "zeta");
    }

    #[tokio::test]
    async fn requests_carry_auth_and_user_agent_headers() {
        let (root, handle) = serve_once(tiny_http::Response::from_string("{}"));

        client(&root).get_single("").await.unwrap();
        let headers = handle.join().unwrap();

        assert!(headers.contains(&("authorization".to_string(), "Bearer test-token".to_string())));
        assert!(
            headers
                .iter()
                .any(|(name, value)| name == "user-agent" && value.starts_with("sntr rust/"))
        );
    }

    #[tokio::test]
    async fn non_200_status_is_request_failed() {
        let (root, handle) =
            serve_once(tiny_http::Response::from_string("ignored").with_status_code(404));

        let err = client(&root).get_single("missing").await.unwrap_err();
        handle.join().unwrap();

        match err {
            Error::RequestFailed { status, .. } => assert_eq!(status, 404),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let (root, handle) = serve_once(tiny_http::Response::from_string("not json"));

        let err = client(&root).get_single("whatever").await.unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn object_body_fails_multi_decode() {
        let (root, handle) = serve_once(tiny_http::Response::from_string(r#"{"slug": "acme"}"#));

        let err = client(&root).get_multiple("organizations").await.unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn raw_bytes_come_back_unmodified() {
        // Odd spacing and key order must survive: raw mode never re-encodes.
        let body = "{\n  \"zz\": 1,\t\"aa\": [ ] }";
        let (root, handle) = serve_once(tiny_http::Response::from_string(body));

        let bytes = client(&root).get_raw("anything").await.unwrap();
        handle.join().unwrap();

        assert_eq!(bytes, body.as_bytes());
    }

    #[tokio::test]
    async fn connection_failure_is_a_network_error() {
        // Bind and drop a listener so the port is very likely unused.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = client(&format!("http://127.0.0.1:{port}"))
            .get_single("organizations")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
