use chrono::NaiveDateTime;
use eframe::egui::{Frame, ScrollArea, Stroke, Ui};

use super::common::UiColors;

const INITIAL_LINE: &str = "Currently no connections.";
const PANEL_HEIGHT: f32 = 150.0;

/// One timestamped line in the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub line: String,
}

impl LogEntry {
    fn new(line: String) -> Self {
        LogEntry {
            timestamp: chrono::Local::now().naive_local(),
            line,
        }
    }
}

/// The on-screen message log. Every user-visible event lands here:
/// validation errors, connection lifecycle lines, toggle notices, and
/// each incoming message.
pub struct LogPanel {
    entries: Vec<LogEntry>,
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl LogPanel {
    pub fn new() -> Self {
        LogPanel {
            entries: vec![LogEntry::new(INITIAL_LINE.to_string())],
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(LogEntry::new(line.into()));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn render(&mut self, ui: &mut Ui) {
        ui.label("Messages");
        Frame::new()
            .stroke(Stroke::new(1.0, UiColors::BORDER))
            .fill(UiColors::EXTREME_BG)
            .inner_margin(4)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ScrollArea::vertical()
                    .id_salt("message_log")
                    .max_height(PANEL_HEIGHT)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &self.entries {
                            ui.monospace(format!(
                                "{}  {}",
                                entry.timestamp.format("%H:%M:%S"),
                                entry.line
                            ));
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_no_connections_line() {
        let panel = LogPanel::new();
        assert_eq!(panel.entries().len(), 1);
        assert_eq!(panel.entries()[0].line, INITIAL_LINE);
    }

    #[test]
    fn pushed_lines_are_appended_in_order() {
        let mut panel = LogPanel::new();
        panel.push("first");
        panel.push("second");
        let lines: Vec<&str> = panel.entries().iter().map(|e| e.line.as_str()).collect();
        assert_eq!(lines, vec![INITIAL_LINE, "first", "second"]);
    }
}
