//! # MQTT Integration Module
//!
//! Wraps the broker connection behind a background task so the UI never
//! touches the network directly. The visualizer subscribes to a single
//! wildcard topic (`<topic>/#`) and forwards every delivery to the UI,
//! where the subtopic decides which flow animation to run.
//!
//! ## Module layout
//!
//! ```text
//! mqtt/
//! ├── settings.rs - connection settings, validation, transport selection
//! ├── message.rs  - received message representation
//! └── worker.rs   - rumqttc event loop task and UI-bound events
//! ```
//!
//! ## Threading model
//!
//! The rumqttc event loop runs on the tokio runtime; the UI runs on the
//! main thread. The two only meet through bounded mpsc channels: connect
//! requests travel UI -> worker, connection lifecycle and message events
//! travel worker -> UI and are drained once per frame. Network callbacks
//! therefore never mutate UI state from a foreign thread.
//!
//! ## Failure policy
//!
//! A connection that fails or drops is reported once and the task ends.
//! There is no retry or reconnect logic; the user presses Connect again.

pub mod message;
pub mod settings;
pub mod worker;
