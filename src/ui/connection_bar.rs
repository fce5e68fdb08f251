use eframe::egui::{Button, TextEdit, Ui};

use crate::config::VisualizerDefaults;
use crate::mqtt::worker::ConnectionState;

use super::common::UiColors;

/// What the user did with the connection bar this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BarResponse {
    pub connect_clicked: bool,
    pub websocket_toggled: Option<bool>,
    pub tls_toggled: Option<bool>,
}

/// Broker/port/topic input fields, transport toggles and the Connect
/// button. Holds raw field text; validation happens on connect.
pub struct ConnectionBar {
    pub broker_input: String,
    pub port_input: String,
    pub topic_input: String,
    pub use_websocket: bool,
    pub use_tls: bool,
}

impl ConnectionBar {
    pub fn new(defaults: &VisualizerDefaults) -> Self {
        ConnectionBar {
            broker_input: defaults.broker.clone(),
            port_input: defaults.port.to_string(),
            topic_input: defaults.topic.clone(),
            use_websocket: false,
            use_tls: false,
        }
    }

    /// Renders the bar. `connection_fresh` keeps the Connect button green
    /// while the current connection is within its keep-alive window.
    pub fn render(
        &mut self,
        ui: &mut Ui,
        state: &ConnectionState,
        connection_fresh: bool,
    ) -> BarResponse {
        let mut response = BarResponse::default();

        ui.horizontal(|ui| {
            ui.label("MQTT Broker:");
            ui.add(TextEdit::singleline(&mut self.broker_input).desired_width(200.0));

            ui.label("Port:");
            ui.add(TextEdit::singleline(&mut self.port_input).desired_width(48.0));

            ui.label("Topic:");
            ui.add(TextEdit::singleline(&mut self.topic_input).desired_width(130.0));

            let connect_button = if connection_fresh {
                Button::new("Connect").fill(UiColors::ACTIVE)
            } else {
                Button::new("Connect")
            };
            if ui.add(connect_button).clicked() {
                response.connect_clicked = true;
            }

            if ui
                .checkbox(&mut self.use_websocket, "Use WebSocket")
                .changed()
            {
                response.websocket_toggled = Some(self.use_websocket);
            }
            if ui
                .checkbox(&mut self.use_tls, "Enable TLS Service")
                .changed()
            {
                response.tls_toggled = Some(self.use_tls);
            }

            let status_color = match state {
                ConnectionState::Connected => UiColors::ACTIVE,
                ConnectionState::Connecting => UiColors::PENDING,
                ConnectionState::Disconnected | ConnectionState::Failed => UiColors::INACTIVE,
            };
            ui.colored_label(status_color, "\u{2B24}");
        });

        response
    }
}
