use super::*;

    /// `fetch`-backed transport. Any HTTP status is returned as a response;
    /// only failures to reach the server or read the body are errors here.
    pub(super) struct GlooTransport;

    #[async_trait(?Send)]
    impl HttpTransport for GlooTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
            let request = Request::post(url)
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .body(body)
                .map_err(|error| TransportError::Encode(error.to_string()))?;
            let response = request
                .send()
                .await
                .map_err(|error| TransportError::Network(error.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|error| TransportError::Network(error.to_string()))?;
            tracing::debug!(url, status, bytes = body.len(), "response received");
            Ok(HttpResponse { status, body })
        }
    }
