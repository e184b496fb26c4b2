use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::info;
use uuid::Uuid;

use crate::error::PolishError;
use crate::polish::{PolishFuture, Polisher};

pub const SYSTEM_PROMPT: &str = "You are a clinical documentation specialist. Polish and optimize \
the following nursing note for professional clarity, proper medical terminology, and concise \
grammar while ensuring all clinical facts remain accurate. Output only the polished text.";

const TEMPERATURE: f32 = 0.2;
const TOP_P: f32 = 0.95;

pub struct BedrockPolisher {
    client: Client,
    model_id: String,
}

impl BedrockPolisher {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Build a client from a region and an optional named profile; without a
    /// profile the default credential chain is used.
    pub async fn from_settings(region: &str, profile: Option<&str>, model_id: &str) -> Self {
        let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));
        if let Some(profile) = profile {
            builder = builder.profile_name(profile);
        }
        let config = builder.load().await;
        Self::new(Client::new(&config), model_id)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn invoke(&self, text: &str) -> Result<String, PolishError> {
        let transaction_id = Uuid::new_v4();
        info!(transaction_id = %transaction_id, model = %self.model_id, "starting note polish");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(format!("Note: {text}")))
                    .build()
                    .map_err(|e| PolishError::Invocation(e.to_string()))?,
            )
            .inference_config(
                InferenceConfiguration::builder()
                    .temperature(TEMPERATURE)
                    .top_p(TOP_P)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| PolishError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| PolishError::ResponseParse("no message in response".to_string()))?;

        let polished = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        info!(transaction_id = %transaction_id, chars = polished.len(), "note polish complete");
        Ok(polished)
    }
}

impl Polisher for BedrockPolisher {
    fn polish<'a>(&'a self, text: &'a str) -> PolishFuture<'a> {
        Box::pin(self.invoke(text))
    }
}
