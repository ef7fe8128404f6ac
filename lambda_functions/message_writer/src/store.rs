use crate::{error::StoreError, record::MessageRecord, settings::Settings};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::future::Future;

/// Partition key attribute of the messages table.
pub const ID_ATTRIBUTE: &str = "Id";
/// Attribute holding the message body.
pub const MESSAGE_ATTRIBUTE: &str = "message";

pub const DEFAULT_REGION: &str = "us-east-1";

/// Somewhere a [`MessageRecord`] can be inserted.
///
/// Implementations must be safe to call concurrently; the handler issues one
/// `put_record` per message of a batch and awaits them together.
pub trait RecordStore {
    fn put_record(
        &self,
        record: &MessageRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Writes records into a DynamoDB table with a single `PutItem` each.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub async fn from_settings(settings: &Settings) -> Self {
        let config = aws_config(settings).await;
        Self::new(Client::new(&config), settings.table_name.as_str())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl RecordStore for DynamoDbStore {
    async fn put_record(&self, record: &MessageRecord) -> Result<(), StoreError> {
        // No condition expression: an id collision overwrites the earlier item.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(ID_ATTRIBUTE, AttributeValue::S(record.id.to_string()))
            .item(MESSAGE_ATTRIBUTE, AttributeValue::S(record.payload.clone()))
            .send()
            .await
            .map_err(|err| StoreError::PutItem {
                table: self.table_name.clone(),
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }
}

/// # Creates an AWS SDK config object
///
/// The region comes from the settings if given, then the default provider
/// chain, then [`DEFAULT_REGION`].
pub async fn aws_config(settings: &Settings) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(settings.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(DEFAULT_REGION);

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
    if let Some(endpoint_url) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    loader.load().await
}
