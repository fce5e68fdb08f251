use eframe::egui::{Color32, Pos2};

/// Seconds the envelope rests on each waypoint before moving on.
pub const STEP_INTERVAL_SECS: f64 = 1.5;

/// Waypoints for a message travelling from SAP towards the MES:
/// past the retrieve-order arrow, through the `toMES` subtopic and
/// onward to the MES node.
const TO_MES_WAYPOINTS: [Pos2; 4] = [
    Pos2::new(225.0, 150.0),
    Pos2::new(190.0, 315.0),
    Pos2::new(318.0, 265.0),
    Pos2::new(440.0, 170.0),
];

/// Waypoints for a message travelling from the MES back to SAP,
/// through the `toERP` subtopic and the OData interface.
const TO_ERP_WAYPOINTS: [Pos2; 3] = [
    Pos2::new(430.0, 220.0),
    Pos2::new(370.0, 280.0),
    Pos2::new(80.0, 250.0),
];

/// One of the two fixed envelope routes on the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRoute {
    /// New production order, SAP -> MES.
    ToMes,
    /// Production order update, MES -> SAP.
    ToErp,
}

impl FlowRoute {
    /// Selects a route from the last path segment of an incoming topic.
    /// Unknown segments select nothing; the caller only logs those.
    pub fn for_subtopic(subtopic: &str) -> Option<Self> {
        match subtopic {
            "toMES" => Some(FlowRoute::ToMes),
            "toERP" => Some(FlowRoute::ToErp),
            _ => None,
        }
    }

    pub fn waypoints(&self) -> &'static [Pos2] {
        match self {
            FlowRoute::ToMes => &TO_MES_WAYPOINTS,
            FlowRoute::ToErp => &TO_ERP_WAYPOINTS,
        }
    }

    /// Envelope tint: yellow for orders heading to the MES, red for
    /// updates heading back to the ERP.
    pub fn icon_color(&self) -> Color32 {
        match self {
            FlowRoute::ToMes => Color32::from_rgb(240, 200, 40),
            FlowRoute::ToErp => Color32::from_rgb(220, 60, 50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlowRoute::ToMes => "toMES",
            FlowRoute::ToErp => "toERP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subtopics_select_their_route() {
        assert_eq!(FlowRoute::for_subtopic("toMES"), Some(FlowRoute::ToMes));
        assert_eq!(FlowRoute::for_subtopic("toERP"), Some(FlowRoute::ToErp));
    }

    #[test]
    fn unknown_subtopics_select_nothing() {
        assert_eq!(FlowRoute::for_subtopic("toPLC"), None);
        assert_eq!(FlowRoute::for_subtopic(""), None);
        // Matching is case sensitive, like the broker's topic names.
        assert_eq!(FlowRoute::for_subtopic("toerp"), None);
        assert_eq!(FlowRoute::for_subtopic("TOMES"), None);
    }

    #[test]
    fn routes_have_their_fixed_waypoints() {
        assert_eq!(FlowRoute::ToMes.waypoints().len(), 4);
        assert_eq!(FlowRoute::ToErp.waypoints().len(), 3);
        assert_eq!(FlowRoute::ToMes.waypoints()[0], Pos2::new(225.0, 150.0));
        assert_eq!(FlowRoute::ToErp.waypoints()[0], Pos2::new(430.0, 220.0));
    }
}
