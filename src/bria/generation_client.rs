use crate::{
    config::{AuthScheme, BriaConfig},
    error::{ConceptifyError, Result},
    models::{GenerationRequest, ResponseShape},
};
use reqwest::Client;
use serde_json::Value;

#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    auth_scheme: AuthScheme,
}

impl GenerationClient {
    pub fn new(client: Client, config: &BriaConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
            auth_scheme: config.auth_scheme,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one text-to-image request and returns the recognized response shape.
    pub async fn send(&self, request: &GenerationRequest, api_key: &str) -> Result<ResponseShape> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConceptifyError::AuthenticationMissing);
        }
        request.validate()?;

        log::info!(
            "Requesting {} image(s) at {} ({})",
            request.num_results,
            request.aspect_ratio,
            self.endpoint
        );
        log::debug!("Generation prompt: {}", request.prompt);

        let builder = self.client.post(&self.endpoint).json(request);
        let builder = match self.auth_scheme {
            AuthScheme::Bearer => builder.bearer_auth(api_key),
            AuthScheme::ApiToken => builder.header("api_token", api_key),
        };

        let response = builder.send().await.map_err(|e| {
            log::error!("Generation request failed: {}", e);
            ConceptifyError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Generation endpoint returned {}: {}", status, error_text);
            return Err(ConceptifyError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let body: Value = serde_json::from_slice(&body)?;
        log::debug!("Generation response: {}", body);

        match ResponseShape::detect(&body) {
            ResponseShape::Unrecognized => {
                log::warn!("Unrecognized generation response shape");
                Err(ConceptifyError::ResponseShapeUnrecognized)
            }
            shape => Ok(shape),
        }
    }

    /// Sends one request and returns the normalized URL list.
    pub async fn generate(&self, request: &GenerationRequest, api_key: &str) -> Result<Vec<String>> {
        self.send(request, api_key).await?.urls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AspectRatio;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PATH: &str = "/v1/text-to-image/hd/2.3";

    fn client_for(server: &MockServer, scheme: AuthScheme) -> GenerationClient {
        let config = BriaConfig::new()
            .with_base_url(server.uri())
            .with_auth_scheme(scheme);
        GenerationClient::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_single_url_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "prompt": "Photosynthesis",
                "num_results": 1,
                "aspect_ratio": "1:1",
                "medium": "art"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result_url": "http://x/a.png"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::Bearer);
        let urls = client
            .generate(&GenerationRequest::new("Photosynthesis"), "test-key")
            .await
            .unwrap();
        assert_eq!(urls, vec!["http://x/a.png"]);
    }

    #[tokio::test]
    async fn test_api_token_header_and_entries_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PATH))
            .and(header("api_token", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{"urls": ["http://x/b.png", "http://x/c.png"]}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::ApiToken);
        let request = GenerationRequest::new("Cell").with_aspect_ratio(AspectRatio::Portrait);
        let urls = client.generate(&request, "test-key").await.unwrap();
        assert_eq!(urls, vec!["http://x/b.png"]);
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::Bearer);
        let err = client
            .generate(&GenerationRequest::new("Photosynthesis"), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, ConceptifyError::AuthenticationMissing));
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_dispatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::Bearer);
        let request = GenerationRequest::new("Photosynthesis").with_num_results(9);
        let err = client.generate(&request, "key").await.unwrap_err();
        assert!(matches!(err, ConceptifyError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::Bearer);
        let err = client
            .generate(&GenerationRequest::new("Photosynthesis"), "key")
            .await
            .unwrap_err();
        assert!(matches!(err, ConceptifyError::HttpError { status: 401 }));
    }

    #[tokio::test]
    async fn test_malformed_and_unrecognized_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"prompt": "broken"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"prompt": "odd"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
            .mount(&server)
            .await;

        let client = client_for(&server, AuthScheme::Bearer);
        let err = client.generate(&GenerationRequest::new("broken"), "key").await.unwrap_err();
        assert!(matches!(err, ConceptifyError::MalformedResponse(_)));

        let err = client.generate(&GenerationRequest::new("odd"), "key").await.unwrap_err();
        assert!(matches!(err, ConceptifyError::ResponseShapeUnrecognized));
    }
}
