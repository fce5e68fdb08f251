use eframe::egui::Pos2;

use super::route::{FlowRoute, STEP_INTERVAL_SECS};

/// A single envelope travelling along a [`FlowRoute`].
///
/// The animation is a linear chain of delayed position updates: the icon
/// sits on one waypoint per step and jumps to the next one every
/// [`STEP_INTERVAL_SECS`]. Timekeeping is supplied by the caller (the UI
/// passes egui's frame time), which keeps the chain deterministic in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowAnimation {
    route: FlowRoute,
    step: usize,
    step_started: f64,
}

impl FlowAnimation {
    pub fn start(route: FlowRoute, now: f64) -> Self {
        FlowAnimation {
            route,
            step: 0,
            step_started: now,
        }
    }

    /// Advances the waypoint chain up to `now`.
    ///
    /// Returns `true` while the envelope is still on the diagram and
    /// `false` once it has moved past the last waypoint, at which point
    /// the caller drops it.
    pub fn advance(&mut self, now: f64) -> bool {
        while now - self.step_started >= STEP_INTERVAL_SECS {
            self.step += 1;
            self.step_started += STEP_INTERVAL_SECS;
            if self.step >= self.route.waypoints().len() {
                return false;
            }
        }
        true
    }

    /// Current envelope position on the logical canvas.
    pub fn position(&self) -> Pos2 {
        let waypoints = self.route.waypoints();
        waypoints[self.step.min(waypoints.len() - 1)]
    }

    pub fn route(&self) -> FlowRoute {
        self.route
    }
}
