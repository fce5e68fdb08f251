use chrono::NaiveDateTime;
use std::fmt;

/// A message delivered by the broker, stamped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMessage {
    pub topic: String,
    pub payload: String,
    pub timestamp: NaiveDateTime,
}

impl fmt::Display for FlowMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.timestamp, self.topic)
    }
}

impl FlowMessage {
    pub fn new(topic: String, payload: &[u8]) -> Self {
        FlowMessage {
            topic,
            payload: String::from_utf8_lossy(payload).into_owned(),
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    /// Last path segment of the topic; selects the animation route.
    pub fn subtopic(&self) -> &str {
        self.topic.rsplit('/').next().unwrap_or(&self.topic)
    }

    /// Log line shown in the message panel.
    pub fn render(&self) -> String {
        format!(
            "Topic: '{}'  +++ Incoming message: '{}' +++",
            self.topic, self.payload
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtopic_is_the_last_segment() {
        let msg = FlowMessage::new("factory/line1/toERP".to_string(), b"order 42");
        assert_eq!(msg.subtopic(), "toERP");
    }

    #[test]
    fn subtopic_of_a_flat_topic_is_the_topic() {
        let msg = FlowMessage::new("toMES".to_string(), b"");
        assert_eq!(msg.subtopic(), "toMES");
    }

    #[test]
    fn render_includes_topic_and_payload() {
        let msg = FlowMessage::new("ucc/toMES".to_string(), b"new order");
        let line = msg.render();
        assert!(line.contains("ucc/toMES"));
        assert!(line.contains("new order"));
    }

    #[test]
    fn non_utf8_payloads_are_decoded_lossily() {
        let msg = FlowMessage::new("ucc/toMES".to_string(), &[0xff, 0xfe, b'o', b'k']);
        assert!(msg.payload.contains("ok"));
    }
}
