//! Sequential consumer loop over the durable log queue.

use std::future::Future;
use std::str::FromStr;

use futures::StreamExt;
use lapin::Channel;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions};
use lapin::types::FieldTable;

use eventline_core::envelope::Envelope;

use crate::error::BrokerError;
use crate::topology;

/// What to do with a delivery whose handler reported failure.
///
/// `Always` acknowledges regardless of outcome: handler failures are logged
/// but never block queue drainage, and the delivery is not retried. This is
/// the historical behavior of the pipeline and the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AckPolicy {
    /// Acknowledge every delivery, whether the handler succeeded or not.
    #[default]
    Always,
    /// Acknowledge on success; negatively acknowledge with requeue on
    /// failure, triggering redelivery.
    RequeueOnFailure,
}

impl FromStr for AckPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "requeue-on-failure" => Ok(Self::RequeueOnFailure),
            other => Err(format!(
                "invalid ack policy \"{other}\" (expected \"always\" or \"requeue-on-failure\")"
            )),
        }
    }
}

/// Runs the consumer loop until the delivery stream closes or a fatal
/// transport error occurs.
///
/// Deliveries are processed strictly one at a time: the handler is awaited
/// before the next delivery is pulled, so in-flight side effects are
/// bounded to one. A delivery that fails to deserialize is fatal to the
/// loop, since wire-format corruption is not something an ack or nack can
/// fix.
///
/// # Errors
///
/// Returns `BrokerError::Amqp` on transport failure and
/// `BrokerError::Codec` on an undecodable delivery.
pub async fn consume<H, Fut>(
    channel: &Channel,
    policy: AckPolicy,
    mut handler: H,
) -> Result<(), BrokerError>
where
    H: FnMut(Envelope) -> Fut + Send,
    Fut: Future<Output = bool> + Send,
{
    let mut deliveries = channel
        .basic_consume(
            topology::LOG_QUEUE,
            "",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await?;

    tracing::info!(queue = topology::LOG_QUEUE, ?policy, "consumer loop started");

    while let Some(delivery) = deliveries.next().await {
        let delivery = delivery?;
        let envelope = Envelope::from_wire(&delivery.data)?;
        let id = envelope.id;
        let name = envelope.name.clone();

        if handler(envelope).await {
            delivery.ack(BasicAckOptions::default()).await?;
        } else {
            match policy {
                AckPolicy::Always => {
                    tracing::warn!(%id, %name, "handler failed; acknowledging anyway");
                    delivery.ack(BasicAckOptions::default()).await?;
                }
                AckPolicy::RequeueOnFailure => {
                    tracing::warn!(%id, %name, "handler failed; requeueing");
                    delivery
                        .nack(BasicNackOptions {
                            requeue: true,
                            ..BasicNackOptions::default()
                        })
                        .await?;
                }
            }
        }
    }

    tracing::info!("delivery stream closed; consumer loop exiting");
    Ok(())
}
