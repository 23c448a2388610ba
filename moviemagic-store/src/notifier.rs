use std::time::Duration;

use async_trait::async_trait;
use moviemagic_core::{Notifier, NotifyError};
use moviemagic_shared::models::EmailNotification;
use moviemagic_shared::Masked;
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tracing::{debug, error};

/// Publishes e-mail requests to the notification topic; a downstream
/// subscriber performs the actual delivery.
#[derive(Clone)]
pub struct KafkaNotifier {
    producer: FutureProducer,
    topic: String,
}

impl KafkaNotifier {
    pub fn new(brokers: &str, topic: impl Into<String>) -> Result<Self, KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self {
            producer,
            topic: topic.into(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl Notifier for KafkaNotifier {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let notification = EmailNotification {
            email: email.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        let payload = notification
            .to_payload()
            .map_err(|e| NotifyError::Unavailable(e.to_string()))?;

        let record = FutureRecord::to(&self.topic).key(email).payload(&payload);

        match self.producer.send(record, Timeout::After(Duration::ZERO)).await {
            Ok(delivery) => {
                debug!(
                    "Published '{}' for {} to {} (partition {} offset {})",
                    subject,
                    Masked(email),
                    self.topic,
                    delivery.partition,
                    delivery.offset
                );
                Ok(())
            }
            Err((e, _msg)) => {
                error!("Failed to publish to {}: {}", self.topic, e);
                Err(NotifyError::Unavailable(e.to_string()))
            }
        }
    }
}
