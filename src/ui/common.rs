//! Shared UI styling for the visualizer's dark theme.
//!
//! Colors live in one place so the connection bar, diagram chrome, and
//! log panel stay visually consistent. The diagram's node fills are the
//! exception: they mirror the fixed component colors of the flow chart
//! and are defined next to the layout in [`super::diagram`].

use eframe::egui::Color32;

/// Centralized color palette for the dark theme.
///
/// Uses associated constants so the values are available at compile time
/// and no palette struct has to be threaded through the render calls.
pub struct UiColors;

impl UiColors {
    /// Primary background for main content areas
    pub const MAIN_BG: Color32 = Color32::from_rgb(30, 30, 30);

    /// Background for nested components
    pub const INNER_BG: Color32 = Color32::from_rgb(25, 25, 25);

    /// Deepest background for emphasized content
    pub const EXTREME_BG: Color32 = Color32::from_rgb(20, 20, 20);

    /// Border color for component separation
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 60);

    /// Connected/enabled status - green
    pub const ACTIVE: Color32 = Color32::from_rgb(50, 200, 20);

    /// Connection attempt in flight - amber
    pub const PENDING: Color32 = Color32::from_rgb(220, 170, 30);

    /// Disconnected/failed status - red
    pub const INACTIVE: Color32 = Color32::from_rgb(200, 50, 20);
}
