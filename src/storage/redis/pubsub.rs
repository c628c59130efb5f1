//! Redis Pub/Sub operations
//!
//! Publishing goes through the guarded connection. Subscribing opens a
//! dedicated connection, since a subscribed connection cannot run other
//! commands. Channel names are namespaced like keys.

use super::guard::ConnectError;
use super::prefix::KeyPrefix;
use super::store::{RedisStore, decode, encode};
use crate::utils::error::Result;
use futures::StreamExt;
use redis::AsyncCommands;
use redis::aio::PubSub;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// A message received on a subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Channel the message was published on, prefix stripped
    pub channel: String,
    /// Pattern that matched, for pattern subscriptions
    pub pattern: Option<String>,
    /// Raw payload
    pub payload: String,
}

impl Message {
    /// Decode the payload as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.payload)
    }
}

/// An open subscription on a dedicated connection
pub struct Subscription {
    pubsub: PubSub,
    prefix: KeyPrefix,
    channels: Vec<String>,
    patterns: Vec<String>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channels", &self.channels)
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl RedisStore {
    /// Publish message to channel; returns how many subscribers received it
    pub async fn publish(&self, channel: &str, message: &str) -> Result<usize> {
        let mut conn = self.get_connection().await?;
        let receivers: usize = conn.publish(self.key(channel), message).await?;
        Ok(receivers)
    }

    /// Publish a JSON-encoded message
    pub async fn publish_json<T: Serialize + ?Sized>(
        &self,
        channel: &str,
        message: &T,
    ) -> Result<usize> {
        self.publish(channel, &encode(message)?).await
    }

    /// Subscribe to channels
    pub async fn subscribe<C: AsRef<str>>(&self, channels: &[C]) -> Result<Subscription> {
        let mut subscription = self.open_subscription().await?;
        for channel in channels {
            subscription.subscribe(channel.as_ref()).await?;
        }
        Ok(subscription)
    }

    /// Subscribe to channel patterns
    pub async fn psubscribe<P: AsRef<str>>(&self, patterns: &[P]) -> Result<Subscription> {
        let mut subscription = self.open_subscription().await?;
        for pattern in patterns {
            subscription.psubscribe(pattern.as_ref()).await?;
        }
        Ok(subscription)
    }

    async fn open_subscription(&self) -> Result<Subscription> {
        let timeout = self.settings().connect_timeout();
        let client = self.guard.connector().client();
        let pubsub = tokio::time::timeout(timeout, client.get_async_pubsub())
            .await
            .map_err(|_| ConnectError::Timeout(timeout))?
            .map_err(ConnectError::Redis)?;

        debug!("Opened dedicated pub/sub connection");
        Ok(Subscription {
            pubsub,
            prefix: self.prefix.clone(),
            channels: Vec::new(),
            patterns: Vec::new(),
        })
    }
}

impl Subscription {
    /// Channels currently subscribed, without prefix
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Patterns currently subscribed, without prefix
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Add a channel to this subscription
    pub async fn subscribe(&mut self, channel: &str) -> Result<()> {
        self.pubsub.subscribe(self.prefix.apply(channel)).await?;
        info!("Subscribed to channel {}", channel);
        self.channels.push(channel.to_string());
        Ok(())
    }

    /// Add a pattern to this subscription
    pub async fn psubscribe(&mut self, pattern: &str) -> Result<()> {
        self.pubsub.psubscribe(self.prefix.apply_pattern(pattern)).await?;
        info!("Subscribed to pattern {}", pattern);
        self.patterns.push(pattern.to_string());
        Ok(())
    }

    /// Leave a channel
    pub async fn unsubscribe(&mut self, channel: &str) -> Result<()> {
        self.pubsub.unsubscribe(self.prefix.apply(channel)).await?;
        self.channels.retain(|c| c != channel);
        debug!("Unsubscribed from channel {}", channel);
        Ok(())
    }

    /// Leave a pattern
    pub async fn punsubscribe(&mut self, pattern: &str) -> Result<()> {
        self.pubsub.punsubscribe(self.prefix.apply_pattern(pattern)).await?;
        self.patterns.retain(|p| p != pattern);
        debug!("Unsubscribed from pattern {}", pattern);
        Ok(())
    }

    /// Leave every channel and pattern
    pub async fn unsubscribe_all(&mut self) -> Result<()> {
        for channel in std::mem::take(&mut self.channels) {
            self.pubsub.unsubscribe(self.prefix.apply(&channel)).await?;
        }
        for pattern in std::mem::take(&mut self.patterns) {
            self.pubsub.punsubscribe(self.prefix.apply_pattern(&pattern)).await?;
        }
        Ok(())
    }

    /// Wait for the next message; `None` once the connection is gone
    pub async fn next_message(&mut self) -> Result<Option<Message>> {
        let next = {
            let mut stream = std::pin::pin!(self.pubsub.on_message());
            stream.next().await
        };

        let Some(msg) = next else {
            debug!("Pub/sub connection closed");
            return Ok(None);
        };

        let payload: String = msg.get_payload()?;
        let pattern = if msg.from_pattern() {
            let pattern: String = msg.get_pattern()?;
            Some(self.prefix.strip_pattern(&pattern).to_string())
        } else {
            None
        };

        Ok(Some(Message {
            channel: self.prefix.strip(msg.get_channel_name()).to_string(),
            pattern,
            payload,
        }))
    }

    /// Wait for the next message and decode it as JSON
    pub async fn next_json<T: DeserializeOwned>(&mut self) -> Result<Option<(String, T)>> {
        match self.next_message().await? {
            Some(message) => {
                let value = message.json()?;
                Ok(Some((message.channel, value)))
            }
            None => Ok(None),
        }
    }
}
