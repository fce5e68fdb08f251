//! # Visualizer User Interface Module
//!
//! Implements the complete eframe/egui surface of the visualizer: the
//! connection bar on top, the message flow diagram in the center and the
//! message log at the bottom.
//!
//! ## Architectural Role
//!
//! The UI is the only place where backend events become visible state.
//! Each frame it drains the worker's event channel and translates the
//! events into log lines, connection state changes and flow animations.
//! Because the drain happens on the UI thread, the rumqttc event loop
//! never touches UI state directly; the channel is the synchronization
//! point.
//!
//! ## Frame Processing
//!
//! The immediate mode pattern reconstructs the whole surface every
//! frame from current state. A 30fps repaint cadence
//! (`request_repaint_after(33ms)`) keeps the waypoint animation moving
//! even when no input events arrive.
//!
//! ## Layout
//!
//! A consistent three-panel layout:
//! - **Top panel**: broker/port/topic fields, transport toggles, Connect
//! - **Central panel**: the flow diagram with the animated envelope
//! - **Bottom panel**: timestamped message log

pub mod common;
pub mod connection_bar;
pub mod diagram;
pub mod log_panel;

use std::time::Duration;

use eframe::egui::{self, Context};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::config::VisualizerDefaults;
use crate::flow::route::FlowRoute;
use crate::mqtt::settings::{ConnectionSettings, KEEP_ALIVE};
use crate::mqtt::worker::{ConnectionState, MqttEvent};

use self::connection_bar::ConnectionBar;
use self::diagram::Diagram;
use self::log_panel::LogPanel;

/// Central UI component holding all visible state and the channel ends
/// towards the MQTT worker.
pub struct FlowVisualizerApp {
    connection_bar: ConnectionBar,
    diagram: Diagram,
    log: LogPanel,
    connection_state: ConnectionState,

    /// Frame time of the last successful connect; keeps the Connect
    /// button green for the keep-alive window.
    connected_at: Option<f64>,

    connect_tx: mpsc::Sender<ConnectionSettings>,
    event_rx: mpsc::Receiver<MqttEvent>,
}

impl FlowVisualizerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        defaults: VisualizerDefaults,
        connect_tx: mpsc::Sender<ConnectionSettings>,
        event_rx: mpsc::Receiver<MqttEvent>,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        Self::from_parts(defaults, connect_tx, event_rx)
    }

    fn from_parts(
        defaults: VisualizerDefaults,
        connect_tx: mpsc::Sender<ConnectionSettings>,
        event_rx: mpsc::Receiver<MqttEvent>,
    ) -> Self {
        FlowVisualizerApp {
            connection_bar: ConnectionBar::new(&defaults),
            diagram: Diagram::new(),
            log: LogPanel::new(),
            connection_state: ConnectionState::default(),
            connected_at: None,
            connect_tx,
            event_rx,
        }
    }

    fn drain_events(&mut self, now: f64) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event, now);
        }
    }

    /// Translates one worker event into visible state.
    fn apply_event(&mut self, event: MqttEvent, now: f64) {
        match event {
            MqttEvent::Connected { broker } => {
                self.connection_state = ConnectionState::Connected;
                self.connected_at = Some(now);
                self.diagram.mark_connected();
                self.log
                    .push(format!("Connected with broker '{}'.", broker));
            }
            MqttEvent::Subscribed { topic } => {
                self.log.push(format!("Subscribed to topic: '{}'.", topic));
            }
            MqttEvent::Refused { code } => {
                self.connection_state = ConnectionState::Failed;
                self.log.push(format!(
                    "+++ Connection failed with error code '{}'. +++",
                    code
                ));
            }
            MqttEvent::Failed { reason } => {
                self.connection_state = ConnectionState::Failed;
                self.log
                    .push(format!("+++ Error: Connection failed! - '{}' +++", reason));
            }
            MqttEvent::Message(message) => {
                self.log.push(message.render());
                match FlowRoute::for_subtopic(message.subtopic()) {
                    Some(route) => {
                        debug!("Starting '{}' flow animation", route.label());
                        self.diagram.start_flow(route, now);
                    }
                    None => warn!("Unknown topic: '{}'", message.topic),
                }
            }
        }
    }

    /// Validates the connection bar and hands the settings to the
    /// worker. A validation error only produces a log line; nothing is
    /// sent over the channel.
    fn request_connect(&mut self) {
        let bar = &self.connection_bar;
        match ConnectionSettings::parse(
            &bar.broker_input,
            &bar.port_input,
            &bar.topic_input,
            bar.use_websocket,
            bar.use_tls,
        ) {
            Ok(settings) => {
                self.log.push(format!(
                    "Connecting to broker '{}:{}'",
                    settings.broker, settings.port
                ));
                self.log
                    .push(format!("Subscribing to topic: '{}'", settings.wildcard_topic()));
                self.connection_state = ConnectionState::Connecting;
                if let Err(e) = self.connect_tx.try_send(settings) {
                    error!("Failed to queue connect request: {}", e);
                    self.log.push("Error: Connect request could not be queued.");
                    self.connection_state = ConnectionState::Failed;
                }
            }
            Err(e) => {
                warn!("Rejected connect attempt: {}", e);
                self.log.push(format!("Error: {}.", e));
            }
        }
    }

    fn connection_fresh(&self, now: f64) -> bool {
        self.connection_state == ConnectionState::Connected
            && self
                .connected_at
                .is_some_and(|t| now - t < KEEP_ALIVE.as_secs_f64())
    }
}

impl eframe::App for FlowVisualizerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.drain_events(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.ctx().request_repaint_after(Duration::from_millis(33));

            egui::TopBottomPanel::top("connection_bar")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    let fresh = self.connection_fresh(now);
                    let response = self.connection_bar.render(ui, &self.connection_state, fresh);

                    if let Some(enabled) = response.websocket_toggled {
                        self.log.push(if enabled {
                            "Enabled WebSocket service."
                        } else {
                            "Disabled WebSocket service."
                        });
                    }
                    if let Some(enabled) = response.tls_toggled {
                        self.log.push(if enabled {
                            "Enabled TLS service."
                        } else {
                            "Disabled TLS service."
                        });
                    }
                    if response.connect_clicked {
                        self.request_connect();
                    }
                });

            egui::TopBottomPanel::bottom("message_log")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    self.log.render(ui);
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                ui.heading("Message Flow Visualization");
                self.diagram.render(ui);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::route::STEP_INTERVAL_SECS;
    use crate::mqtt::message::FlowMessage;

    fn app_with_channels() -> (
        FlowVisualizerApp,
        mpsc::Receiver<ConnectionSettings>,
        mpsc::Sender<MqttEvent>,
    ) {
        let (connect_tx, connect_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let app = FlowVisualizerApp::from_parts(VisualizerDefaults::default(), connect_tx, event_rx);
        (app, connect_rx, event_tx)
    }

    fn last_line(app: &FlowVisualizerApp) -> &str {
        &app.log.entries().last().expect("log is never empty").line
    }

    #[test]
    fn empty_topic_logs_an_error_and_sends_nothing() {
        let (mut app, mut connect_rx, _event_tx) = app_with_channels();
        app.connection_bar.topic_input.clear();

        app.request_connect();

        assert_eq!(last_line(&app), "Error: No topic specified.");
        assert!(connect_rx.try_recv().is_err());
        assert_eq!(app.connection_state, ConnectionState::Disconnected);
    }

    #[test]
    fn invalid_port_logs_an_error_and_sends_nothing() {
        let (mut app, mut connect_rx, _event_tx) = app_with_channels();
        app.connection_bar.topic_input = "ucc".to_string();
        app.connection_bar.port_input = "none".to_string();

        app.request_connect();

        assert_eq!(last_line(&app), "Error: Invalid port 'none'.");
        assert!(connect_rx.try_recv().is_err());
    }

    #[test]
    fn valid_settings_are_handed_to_the_worker() {
        let (mut app, mut connect_rx, _event_tx) = app_with_channels();
        app.connection_bar.topic_input = "ucc".to_string();

        app.request_connect();

        let settings = connect_rx.try_recv().expect("settings queued");
        assert_eq!(settings.topic, "ucc");
        assert_eq!(app.connection_state, ConnectionState::Connecting);
    }

    #[test]
    fn a_to_erp_message_runs_the_erp_route_to_completion() {
        let (mut app, _connect_rx, _event_tx) = app_with_channels();
        let message = FlowMessage::new("ucc/toERP".to_string(), b"order update");

        app.apply_event(MqttEvent::Message(message), 0.0);
        assert_eq!(app.diagram.active_route(), Some(FlowRoute::ToErp));

        let steps = FlowRoute::ToErp.waypoints().len();
        app.diagram.tick(steps as f64 * STEP_INTERVAL_SECS + 0.1);
        assert_eq!(app.diagram.active_route(), None);
    }

    #[test]
    fn a_to_mes_message_runs_the_mes_route_to_completion() {
        let (mut app, _connect_rx, _event_tx) = app_with_channels();
        let message = FlowMessage::new("ucc/toMES".to_string(), b"new order");

        app.apply_event(MqttEvent::Message(message), 0.0);
        assert_eq!(app.diagram.active_route(), Some(FlowRoute::ToMes));

        let steps = FlowRoute::ToMes.waypoints().len();
        app.diagram.tick(steps as f64 * STEP_INTERVAL_SECS + 0.1);
        assert_eq!(app.diagram.active_route(), None);
    }

    #[test]
    fn an_unknown_subtopic_is_logged_but_not_animated() {
        let (mut app, _connect_rx, _event_tx) = app_with_channels();
        let message = FlowMessage::new("ucc/toPLC".to_string(), b"ignored");

        app.apply_event(MqttEvent::Message(message), 0.0);

        assert_eq!(app.diagram.active_route(), None);
        assert!(last_line(&app).contains("ucc/toPLC"));
    }

    #[test]
    fn connected_event_updates_state_and_diagram() {
        let (mut app, _connect_rx, _event_tx) = app_with_channels();

        app.apply_event(
            MqttEvent::Connected {
                broker: "broker.hivemq.com".to_string(),
            },
            5.0,
        );

        assert_eq!(app.connection_state, ConnectionState::Connected);
        assert!(app.diagram.labels_visible());
        assert!(app.connection_fresh(5.0 + 1.0));
        assert!(!app.connection_fresh(5.0 + KEEP_ALIVE.as_secs_f64() + 1.0));
    }

    #[test]
    fn failure_events_mark_the_connection_failed() {
        let (mut app, _connect_rx, _event_tx) = app_with_channels();

        app.apply_event(
            MqttEvent::Failed {
                reason: "Connection refused (os error 111)".to_string(),
            },
            0.0,
        );

        assert_eq!(app.connection_state, ConnectionState::Failed);
        assert!(last_line(&app).contains("Connection failed!"));
    }
}
