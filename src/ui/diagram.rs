//! Static message flow diagram and the animated envelope overlay.
//!
//! The layout is a fixed chart: SAP on the left, the broker rectangle
//! with its three subtopic boxes in the middle, the OData interface
//! below and the MES on the right, joined by arrows. All coordinates
//! live on a logical 700x400 canvas and are mapped into the available
//! panel space each frame, so the chart scales with the window.

use eframe::egui::{
    emath::RectTransform, Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense,
    Stroke, StrokeKind, Ui, Vec2,
};

use crate::flow::animation::FlowAnimation;
use crate::flow::route::FlowRoute;

use super::common::UiColors;

/// Logical canvas all fixed coordinates below refer to.
const CANVAS_SIZE: Vec2 = Vec2::new(700.0, 400.0);

const SAP_NODE: Rect = rect(60.0, 150.0, 160.0, 210.0);
const BROKER_NODE: Rect = rect(200.0, 100.0, 500.0, 300.0);
const UCC_BOX: Rect = rect(310.0, 160.0, 390.0, 190.0);
const TO_MES_BOX: Rect = rect(310.0, 195.0, 390.0, 220.0);
const TO_ERP_BOX: Rect = rect(310.0, 225.0, 390.0, 250.0);
const DATA_INTERFACE_NODE: Rect = rect(275.0, 320.0, 430.0, 380.0);
const MES_NODE: Rect = rect(550.0, 150.0, 650.0, 210.0);
const BANNER: Rect = rect(200.0, 10.0, 500.0, 50.0);

const SAP_FILL: Color32 = Color32::from_rgb(0, 118, 168);
const BROKER_FILL: Color32 = Color32::from_rgb(255, 215, 0);
const SUBTOPIC_FILL: Color32 = Color32::from_rgb(255, 153, 102);
const DATA_INTERFACE_FILL: Color32 = Color32::from_rgb(173, 216, 230);
const MES_FILL: Color32 = Color32::from_rgb(144, 238, 144);
const BANNER_FILL: Color32 = Color32::from_rgb(128, 128, 128);

/// Connection arrows as (tail, head, width); the head end gets the tip.
const ARROWS: [(Pos2, Pos2, f32); 11] = [
    // SAP into the UCC row of the broker
    (Pos2::new(155.0, 170.0), Pos2::new(310.0, 170.0), 4.0),
    // OData interface column up to SAP
    (Pos2::new(100.0, 350.0), Pos2::new(100.0, 210.0), 6.0),
    // SAP column across to the OData interface
    (Pos2::new(100.0, 350.0), Pos2::new(275.0, 350.0), 6.0),
    // UCC box out to the left
    (Pos2::new(310.0, 180.0), Pos2::new(279.0, 180.0), 4.0),
    // and down into the OData interface
    (Pos2::new(280.0, 180.0), Pos2::new(280.0, 320.0), 4.0),
    // MES row into the toERP box
    (Pos2::new(600.0, 240.0), Pos2::new(390.0, 240.0), 4.0),
    // MES down onto its row
    (Pos2::new(600.0, 210.0), Pos2::new(600.0, 240.0), 4.0),
    // OData interface up towards the toMES row
    (Pos2::new(300.0, 320.0), Pos2::new(300.0, 205.0), 4.0),
    // and into the toMES box
    (Pos2::new(300.0, 208.0), Pos2::new(315.0, 208.0), 4.0),
    // toMES box across to the MES
    (Pos2::new(390.0, 200.0), Pos2::new(550.0, 200.0), 4.0),
    // toERP box down into the OData interface
    (Pos2::new(350.0, 250.0), Pos2::new(350.0, 320.0), 4.0),
];

/// Arrow captions shown once a connection is established.
const FLOW_LABELS: [(Pos2, Align2, &str); 4] = [
    (
        Pos2::new(190.0, 335.0),
        Align2::CENTER_CENTER,
        "Retrieve production order",
    ),
    (
        Pos2::new(105.0, 260.0),
        Align2::LEFT_CENTER,
        "Update\nproduction order",
    ),
    (
        Pos2::new(470.0, 250.0),
        Align2::CENTER_CENTER,
        "Update production order",
    ),
    (
        Pos2::new(400.0, 190.0),
        Align2::LEFT_CENTER,
        "New production order",
    ),
];

const fn rect(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Rect {
    Rect {
        min: Pos2::new(min_x, min_y),
        max: Pos2::new(max_x, max_y),
    }
}

/// Diagram state: the running animation (at most one) and whether the
/// flow captions are visible yet.
pub struct Diagram {
    animation: Option<FlowAnimation>,
    labels_visible: bool,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Diagram {
            animation: None,
            labels_visible: false,
        }
    }

    /// Swaps in the arrow captions and drops the no-connection banner.
    pub fn mark_connected(&mut self) {
        self.labels_visible = true;
    }

    pub fn labels_visible(&self) -> bool {
        self.labels_visible
    }

    /// Starts a route, replacing any envelope still on its way. Only one
    /// icon is ever in flight.
    pub fn start_flow(&mut self, route: FlowRoute, now: f64) {
        self.animation = Some(FlowAnimation::start(route, now));
    }

    /// Advances the running animation and drops it once it finishes.
    pub fn tick(&mut self, now: f64) {
        if let Some(animation) = &mut self.animation {
            if !animation.advance(now) {
                self.animation = None;
            }
        }
    }

    pub fn active_route(&self) -> Option<FlowRoute> {
        self.animation.as_ref().map(FlowAnimation::route)
    }

    pub fn render(&mut self, ui: &mut Ui) {
        let now = ui.input(|i| i.time);
        self.tick(now);

        let available = ui.available_size();
        let scale = (available.x / CANVAS_SIZE.x)
            .min(available.y / CANVAS_SIZE.y)
            .max(0.2);
        let (response, painter) = ui.allocate_painter(CANVAS_SIZE * scale, Sense::hover());
        let to_screen = RectTransform::from_to(
            Rect::from_min_size(Pos2::ZERO, CANVAS_SIZE),
            response.rect,
        );

        painter.rect_filled(response.rect, CornerRadius::same(2), UiColors::INNER_BG);

        self.paint_nodes(&painter, &to_screen, scale);
        self.paint_arrows(&painter, &to_screen, scale);

        if self.labels_visible {
            self.paint_flow_labels(&painter, &to_screen, scale);
        } else {
            self.paint_banner(&painter, &to_screen, scale);
        }

        if let Some(animation) = &self.animation {
            paint_envelope(
                &painter,
                to_screen.transform_pos(animation.position()),
                animation.route().icon_color(),
                scale,
            );
        }
    }

    fn paint_nodes(&self, painter: &Painter, to_screen: &RectTransform, scale: f32) {
        node(painter, to_screen, BROKER_NODE, BROKER_FILL, "", scale);
        painter.text(
            to_screen.transform_pos(Pos2::new(350.0, 130.0)),
            Align2::CENTER_CENTER,
            "Broker",
            FontId::proportional(13.0 * scale),
            Color32::BLACK,
        );

        node(painter, to_screen, SAP_NODE, SAP_FILL, "SAP", scale);
        node(painter, to_screen, UCC_BOX, SUBTOPIC_FILL, "UCC (SAP)", scale);
        node(painter, to_screen, TO_MES_BOX, SUBTOPIC_FILL, "toMES", scale);
        node(painter, to_screen, TO_ERP_BOX, SUBTOPIC_FILL, "toERP", scale);
        node(
            painter,
            to_screen,
            DATA_INTERFACE_NODE,
            DATA_INTERFACE_FILL,
            "OData Interface",
            scale,
        );
        node(painter, to_screen, MES_NODE, MES_FILL, "MES", scale);
    }

    fn paint_arrows(&self, painter: &Painter, to_screen: &RectTransform, scale: f32) {
        for (tail, head, width) in ARROWS {
            let tail = to_screen.transform_pos(tail);
            let head = to_screen.transform_pos(head);
            painter.arrow(
                tail,
                head - tail,
                Stroke::new(width * scale * 0.6, Color32::GRAY),
            );
        }
    }

    fn paint_flow_labels(
        &self,
        painter: &Painter,
        to_screen: &RectTransform,
        scale: f32,
    ) {
        for (pos, anchor, text) in FLOW_LABELS {
            painter.text(
                to_screen.transform_pos(pos),
                anchor,
                text,
                FontId::proportional(9.0 * scale),
                Color32::WHITE,
            );
        }
    }

    fn paint_banner(&self, painter: &Painter, to_screen: &RectTransform, scale: f32) {
        let banner = to_screen.transform_rect(BANNER);
        painter.rect_filled(banner, CornerRadius::same(2), BANNER_FILL);
        painter.rect_stroke(
            banner,
            CornerRadius::same(2),
            Stroke::new(1.0, Color32::BLACK),
            StrokeKind::Inside,
        );
        painter.text(
            banner.center(),
            Align2::CENTER_CENTER,
            "Currently no connections.",
            FontId::proportional(13.0 * scale),
            Color32::BLACK,
        );
    }
}

fn node(
    painter: &Painter,
    to_screen: &RectTransform,
    logical: Rect,
    fill: Color32,
    label: &str,
    scale: f32,
) {
    let screen_rect = to_screen.transform_rect(logical);
    painter.rect_filled(screen_rect, CornerRadius::same(2), fill);
    painter.rect_stroke(
        screen_rect,
        CornerRadius::same(2),
        Stroke::new(1.0, Color32::BLACK),
        StrokeKind::Inside,
    );
    if !label.is_empty() {
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(10.0 * scale),
            Color32::BLACK,
        );
    }
}

fn paint_envelope(painter: &Painter, center: Pos2, color: Color32, scale: f32) {
    painter.circle_filled(center, 13.0 * scale, color);
    painter.text(
        center,
        Align2::CENTER_CENTER,
        "\u{2709}",
        FontId::proportional(15.0 * scale),
        Color32::BLACK,
    );
}
