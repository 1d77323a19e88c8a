use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::Deserialize;
use sos_types::domain::order::{Order, OrderDraft};

#[derive(Clone)]
pub struct SosClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// HTTP consumer of the order-intake API.
#[derive(Clone)]
pub struct SosClient {
    base: Url,
    client: reqwest::Client,
}

/// Single-order responses arrive wrapped as `{"order": {...}}`.
#[derive(Deserialize)]
struct OrderEnvelope {
    order: Order,
}

/// Listing responses arrive wrapped as `{"orders": [...]}`.
#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

impl SosClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<SosClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(SosClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    /// Submits a candidate order; the response carries the assigned
    /// identifier. A validation rejection surfaces as a 400 error.
    pub async fn create_order(&self, draft: OrderDraft) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("sos/orders")?)
            .json(&draft)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: &str) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("sos/orders/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        let envelope: OrderEnvelope = res.json().await?;
        Ok(envelope.order)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self
            .client
            .get(self.url("sos/orders")?)
            .send()
            .await?
            .error_for_status()?;
        let envelope: OrdersEnvelope = res.json().await?;
        Ok(envelope.orders)
    }
}

impl SosClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<SosClient> {
        if let Some(client) = self.client {
            return Ok(SosClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(SosClient {
            base: self.base,
            client,
        })
    }
}
