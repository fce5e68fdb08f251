use std::sync::Arc;
use std::time::Duration;

use rumqttc::tokio_rustls::rustls::{
    self,
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    pki_types::{CertificateDer, ServerName, UnixTime},
    ClientConfig, DigitallySignedStruct, SignatureScheme,
};
use rumqttc::{MqttOptions, TlsConfiguration, Transport};
use thiserror::Error;

/// Keep-alive negotiated with the broker. Also bounds how long the
/// Connect button stays green in the UI.
pub const KEEP_ALIVE: Duration = Duration::from_secs(180);

const CLIENT_ID: &str = "flowvis";

/// Validation errors for the connection form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("No topic specified")]
    MissingTopic,
    #[error("Invalid port '{0}'")]
    InvalidPort(String),
}

/// Everything the worker needs to open one broker connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub broker: String,
    pub port: u16,
    pub topic: String,
    pub use_websocket: bool,
    pub use_tls: bool,
}

impl ConnectionSettings {
    /// Validates the raw text from the connection bar.
    ///
    /// An empty topic is rejected before anything else happens, so a
    /// failed validation never causes network traffic.
    pub fn parse(
        broker: &str,
        port: &str,
        topic: &str,
        use_websocket: bool,
        use_tls: bool,
    ) -> Result<Self, SettingsError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SettingsError::MissingTopic);
        }

        let port_text = port.trim();
        let port = port_text
            .parse::<u16>()
            .map_err(|_| SettingsError::InvalidPort(port_text.to_string()))?;

        Ok(ConnectionSettings {
            broker: broker.trim().to_string(),
            port,
            topic: topic.to_string(),
            use_websocket,
            use_tls,
        })
    }

    /// The wildcard subscription covering the topic and all subtopics.
    pub fn wildcard_topic(&self) -> String {
        format!("{}/#", self.topic)
    }

    /// Builds the rumqttc options for the selected transport.
    ///
    /// TLS runs without certificate verification, matching brokers with
    /// self-signed certificates on plant networks.
    pub fn mqtt_options(&self) -> MqttOptions {
        let mut options = if self.use_websocket {
            let scheme = if self.use_tls { "wss" } else { "ws" };
            MqttOptions::new(
                CLIENT_ID,
                format!("{}://{}:{}/mqtt", scheme, self.broker, self.port),
                self.port,
            )
        } else {
            MqttOptions::new(CLIENT_ID, self.broker.clone(), self.port)
        };
        options.set_keep_alive(KEEP_ALIVE);

        match (self.use_websocket, self.use_tls) {
            (false, false) => {}
            (false, true) => {
                options.set_transport(Transport::Tls(insecure_tls_configuration()));
            }
            (true, false) => {
                options.set_transport(Transport::Ws);
            }
            (true, true) => {
                options.set_transport(Transport::Wss(insecure_tls_configuration()));
            }
        }

        options
    }
}

fn insecure_tls_configuration() -> TlsConfiguration {
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
        .with_no_client_auth();
    TlsConfiguration::Rustls(Arc::new(config))
}

/// Accepts every server certificate. The visualizer talks to brokers
/// with self-signed certificates, so hostname and chain checks are off.
#[derive(Debug)]
struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topic_is_rejected() {
        let result = ConnectionSettings::parse("broker.hivemq.com", "1883", "", false, false);
        assert_eq!(result.unwrap_err(), SettingsError::MissingTopic);
    }

    #[test]
    fn whitespace_only_topic_is_rejected() {
        let result = ConnectionSettings::parse("broker.hivemq.com", "1883", "   ", false, false);
        assert_eq!(result.unwrap_err(), SettingsError::MissingTopic);
    }

    #[test]
    fn topic_and_broker_are_trimmed() {
        let settings =
            ConnectionSettings::parse(" broker.hivemq.com ", "1883", " ucc ", false, false)
                .unwrap();
        assert_eq!(settings.broker, "broker.hivemq.com");
        assert_eq!(settings.topic, "ucc");
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let result = ConnectionSettings::parse("broker.hivemq.com", "18x3", "ucc", false, false);
        assert_eq!(
            result.unwrap_err(),
            SettingsError::InvalidPort("18x3".to_string())
        );
    }

    #[test]
    fn wildcard_covers_all_subtopics() {
        let settings =
            ConnectionSettings::parse("broker.hivemq.com", "1883", "ucc", false, false).unwrap();
        assert_eq!(settings.wildcard_topic(), "ucc/#");
    }

    #[test]
    fn plain_tcp_options_carry_host_and_port() {
        let settings =
            ConnectionSettings::parse("broker.hivemq.com", "1883", "ucc", false, false).unwrap();
        let options = settings.mqtt_options();
        assert_eq!(
            options.broker_address(),
            ("broker.hivemq.com".to_string(), 1883)
        );
        assert!(matches!(options.transport(), Transport::Tcp));
    }

    #[test]
    fn websocket_transport_uses_a_ws_url() {
        let settings =
            ConnectionSettings::parse("broker.hivemq.com", "8000", "ucc", true, false).unwrap();
        let options = settings.mqtt_options();
        let (address, _) = options.broker_address();
        assert_eq!(address, "ws://broker.hivemq.com:8000/mqtt");
        assert!(matches!(options.transport(), Transport::Ws));
    }

    #[test]
    fn tls_toggles_select_the_encrypted_transports() {
        let tcp_tls =
            ConnectionSettings::parse("broker.hivemq.com", "8883", "ucc", false, true).unwrap();
        assert!(matches!(
            tcp_tls.mqtt_options().transport(),
            Transport::Tls(_)
        ));

        let wss =
            ConnectionSettings::parse("broker.hivemq.com", "8884", "ucc", true, true).unwrap();
        let options = wss.mqtt_options();
        let (address, _) = options.broker_address();
        assert_eq!(address, "wss://broker.hivemq.com:8884/mqtt");
        assert!(matches!(options.transport(), Transport::Wss(_)));
    }
}
