use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use super::{ItemStore, validate_key};
use crate::config::Config;
use crate::models::Item;

const KEY_ATTR: &str = "id";
const DATA_ATTR: &str = "data";

/// Item store backed by a DynamoDB table with a string partition key `id`
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a DynamoDB-backed store from configuration
    ///
    /// Credentials and region come from the standard AWS provider chain.
    /// `AWS_ENDPOINT_URL` redirects the client to a local emulator. The table
    /// must already exist; it is described once so that a misconfigured table
    /// name fails at startup instead of on the first request.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(endpoint) = config.aws_endpoint_url.as_deref() {
            tracing::info!("Connecting to DynamoDB endpoint at: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        } else {
            tracing::info!("Connecting to DynamoDB using the default AWS endpoint");
        }

        let sdk_config = loader.load().await;
        let store = Self::new(Client::new(&sdk_config), &config.table_name);

        store
            .client
            .describe_table()
            .table_name(&store.table_name)
            .send()
            .await
            .with_context(|| format!("Failed to describe DynamoDB table '{}'", store.table_name))?;

        tracing::info!("Successfully connected to DynamoDB table: {}", store.table_name);
        Ok(store)
    }
}

fn to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (KEY_ATTR.to_string(), AttributeValue::S(item.id)),
        (DATA_ATTR.to_string(), AttributeValue::S(item.data)),
    ])
}

fn string_attr(attrs: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    let value = attrs
        .get(name)
        .with_context(|| format!("Stored record is missing attribute '{}'", name))?;
    value
        .as_s()
        .cloned()
        .map_err(|_| anyhow!("Stored attribute '{}' is not a string", name))
}

fn from_attributes(attrs: &HashMap<String, AttributeValue>) -> Result<Item> {
    Ok(Item {
        id: string_attr(attrs, KEY_ATTR)?,
        data: string_attr(attrs, DATA_ATTR)?,
    })
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn put(&self, item: Item) -> Result<()> {
        validate_key(&item.id)?;
        let id = item.id.clone();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_attributes(item)))
            .send()
            .await
            .context("Failed to put item to DynamoDB")?;

        tracing::debug!("Put item with id: {}", id);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        validate_key(id)?;

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTR, AttributeValue::S(id.to_string()))
            .send()
            .await
            .context("Failed to get item from DynamoDB")?;

        match output.item() {
            Some(attrs) => {
                tracing::debug!("Read item with id: {}", id);
                from_attributes(attrs).map(Some)
            }
            None => {
                tracing::debug!("Item not found with id: {}", id);
                Ok(None)
            }
        }
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        // Follows LastEvaluatedKey until the table is exhausted.
        let records: Vec<HashMap<String, AttributeValue>> = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .context("Failed to scan items from DynamoDB")?;

        let items = records
            .iter()
            .map(from_attributes)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Scanned {} items from {}", items.len(), self.table_name);
        Ok(items)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_key(id)?;

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTR, AttributeValue::S(id.to_string()))
            .send()
            .await
            .context("Failed to delete item from DynamoDB")?;

        tracing::debug!("Deleted item with id: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{Credentials, Region};
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_attribute_conversion() {
        let item = Item {
            id: "a1".to_string(),
            data: "hello".to_string(),
        };
        let attrs = to_attributes(item.clone());
        assert_eq!(attrs.get("id"), Some(&AttributeValue::S("a1".to_string())));
        assert_eq!(attrs.get("data"), Some(&AttributeValue::S("hello".to_string())));
        assert_eq!(from_attributes(&attrs).unwrap(), item);
    }

    #[test]
    fn test_record_missing_data_attribute() {
        let attrs = HashMap::from([("id".to_string(), AttributeValue::S("a1".to_string()))]);
        let error = from_attributes(&attrs).unwrap_err();
        assert!(error.to_string().contains("'data'"));
    }

    #[test]
    fn test_record_with_non_string_attribute() {
        let attrs = HashMap::from([
            ("id".to_string(), AttributeValue::S("a1".to_string())),
            ("data".to_string(), AttributeValue::N("42".to_string())),
        ]);
        let error = from_attributes(&attrs).unwrap_err();
        assert!(error.to_string().contains("not a string"));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DynamoStore>();
    }

    /// Client pointed at a local DynamoDB emulator, if one is configured
    fn emulator_client() -> Option<Client> {
        let endpoint = std::env::var("AWS_ENDPOINT_URL").ok()?;
        let config = aws_sdk_dynamodb::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "items-test"))
            .endpoint_url(endpoint)
            .build();
        Some(Client::from_conf(config))
    }

    async fn create_items_table(client: &Client, table_name: &str) {
        client
            .create_table()
            .table_name(table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(KEY_ATTR)
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(KEY_ATTR)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to create table {table_name}: {e}"));
    }

    #[tokio::test]
    async fn test_crud_against_emulator() {
        let Some(client) = emulator_client() else {
            println!("AWS_ENDPOINT_URL not set, skipping DynamoDB emulator test");
            return;
        };

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let table_name = format!("items-test-{}", nanos);
        create_items_table(&client, &table_name).await;

        let store = DynamoStore::new(client.clone(), &table_name);
        let item = Item {
            id: "a1".to_string(),
            data: "hello".to_string(),
        };

        store.put(item.clone()).await.unwrap();
        assert_eq!(store.get("a1").await.unwrap(), Some(item));

        store
            .put(Item {
                id: "a1".to_string(),
                data: "updated".to_string(),
            })
            .await
            .unwrap();
        store
            .put(Item {
                id: "b2".to_string(),
                data: "world".to_string(),
            })
            .await
            .unwrap();

        let mut items = store.scan_all().await.unwrap();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].data, "updated");

        store.delete("a1").await.unwrap();
        store.delete("a1").await.unwrap();
        assert_eq!(store.get("a1").await.unwrap(), None);

        client
            .delete_table()
            .table_name(&table_name)
            .send()
            .await
            .unwrap();
    }
}
