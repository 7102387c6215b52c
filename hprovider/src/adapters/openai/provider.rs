//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecretString,
};

use super::transport::{DEFAULT_OPENAI_BASE_URL, OpenAiHttpTransport, OpenAiTransport};
use super::types::{OpenAiAuth, OpenAiFunction, OpenAiMessage, OpenAiRequest};

#[derive(Clone)]
pub struct OpenAiProvider {
    auth: OpenAiAuth,
    transport: Arc<dyn OpenAiTransport>,
    id: ProviderId,
}

impl OpenAiProvider {
    pub fn new(auth: OpenAiAuth, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            auth,
            transport,
            id: ProviderId::OpenAi,
        }
    }

    /// Builds a provider that talks to `base_url` over HTTPS with an API key.
    ///
    /// Any base URL other than the public OpenAI endpoint is reported as
    /// [`ProviderId::OpenAiCompatible`].
    pub fn from_api_key(
        api_key: SecretString,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        let mut transport = OpenAiHttpTransport::with_timeout(timeout)?;
        let mut id = ProviderId::OpenAi;
        if let Some(base_url) = base_url
            && base_url.trim_end_matches('/') != DEFAULT_OPENAI_BASE_URL
        {
            transport = transport.with_base_url(base_url);
            id = ProviderId::OpenAiCompatible;
        }

        Ok(Self::new(OpenAiAuth::ApiKey(api_key), Arc::new(transport)).with_id(id))
    }

    pub fn with_id(mut self, id: ProviderId) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn build_openai_request(&self, request: ModelRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(OpenAiMessage::from)
                .collect(),
            functions: request
                .tools
                .into_iter()
                .map(OpenAiFunction::from)
                .collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("auth", &self.auth)
            .field("transport", &self.transport)
            .field("id", &self.id)
            .finish()
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let openai_request = self.build_openai_request(request);
            let response = self
                .transport
                .complete(openai_request, self.auth.clone())
                .await?;
            Ok(response.into_model_response(self.id))
        })
    }
}
