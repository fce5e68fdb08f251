use rumqttc::{AsyncClient, ConnectReturnCode, Event, Incoming, QoS};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::message::FlowMessage;
use super::settings::ConnectionSettings;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

/// Events the connection task reports back to the UI.
#[derive(Debug, Clone)]
pub enum MqttEvent {
    Connected { broker: String },
    Subscribed { topic: String },
    Refused { code: String },
    Failed { reason: String },
    Message(FlowMessage),
}

/// Owns the UI-facing channel ends and spawns one connection task per
/// connect request. A new request cancels the previous connection.
pub struct MqttWorker {
    connect_rx: mpsc::Receiver<ConnectionSettings>,
    event_tx: mpsc::Sender<MqttEvent>,
}

impl MqttWorker {
    pub fn new(
        connect_rx: mpsc::Receiver<ConnectionSettings>,
        event_tx: mpsc::Sender<MqttEvent>,
    ) -> Self {
        MqttWorker {
            connect_rx,
            event_tx,
        }
    }

    pub async fn run(mut self) {
        let mut active: Option<CancellationToken> = None;

        while let Some(settings) = self.connect_rx.recv().await {
            if let Some(previous) = active.take() {
                debug!("Replacing active broker connection");
                previous.cancel();
            }

            let cancel = CancellationToken::new();
            active = Some(cancel.clone());

            let events = self.event_tx.clone();
            tokio::spawn(async move {
                drive_connection(settings, events, cancel).await;
            });
        }

        debug!("Connect channel closed, MQTT worker shutting down");
    }
}

/// Polls one rumqttc event loop until it fails or is cancelled.
///
/// Failures are reported once and end the task; there is no reconnect.
async fn drive_connection(
    settings: ConnectionSettings,
    events: mpsc::Sender<MqttEvent>,
    cancel: CancellationToken,
) {
    let wildcard = settings.wildcard_topic();
    let (client, mut event_loop) = AsyncClient::new(settings.mqtt_options(), 64);

    info!(
        "Connecting to broker '{}:{}' for topic '{}'",
        settings.broker, settings.port, wildcard
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = client.disconnect().await;
                debug!("Connection to '{}' cancelled", settings.broker);
                break;
            }
            polled = event_loop.poll() => match polled {
                Ok(Event::Incoming(Incoming::ConnAck(ack))) => {
                    if ack.code == ConnectReturnCode::Success {
                        let _ = events
                            .send(MqttEvent::Connected {
                                broker: settings.broker.clone(),
                            })
                            .await;
                        if let Err(e) = client.subscribe(wildcard.clone(), QoS::AtMostOnce).await {
                            let _ = events
                                .send(MqttEvent::Failed {
                                    reason: format!("Subscribe to '{}' failed: {}", wildcard, e),
                                })
                                .await;
                            break;
                        }
                    } else {
                        let _ = events
                            .send(MqttEvent::Refused {
                                code: format!("{:?}", ack.code),
                            })
                            .await;
                        break;
                    }
                }
                Ok(Event::Incoming(Incoming::SubAck(_))) => {
                    let _ = events
                        .send(MqttEvent::Subscribed {
                            topic: wildcard.clone(),
                        })
                        .await;
                }
                Ok(Event::Incoming(Incoming::Publish(publish))) => {
                    let message = FlowMessage::new(publish.topic.clone(), &publish.payload);
                    debug!("Delivery on '{}'", message.topic);
                    if events.send(MqttEvent::Message(message)).await.is_err() {
                        // UI side is gone, nothing left to feed.
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Connection to '{}' failed: {}", settings.broker, e);
                    let _ = events
                        .send(MqttEvent::Failed {
                            reason: e.to_string(),
                        })
                        .await;
                    break;
                }
            }
        }
    }
}
