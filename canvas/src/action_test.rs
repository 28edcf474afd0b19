use serde_json::json;

use super::*;
use crate::doc::ZOrder;

#[test]
fn element_update_carries_only_present_fields() {
    let action = Action::ElementUpdated { id: ElementId::Headline, fields: LayoutPatch::font_size(48.0) };
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({ "action": "elementUpdated", "id": "headline", "fields": { "fontSize": 48.0 } })
    );
}

#[test]
fn selection_cleared_serializes_null() {
    let action = Action::SelectionChanged { id: None };
    assert_eq!(serde_json::to_value(&action).unwrap(), json!({ "action": "selectionChanged", "id": null }));
}

#[test]
fn overlay_actions() {
    let update = Action::OverlayUpdated { fields: OverlayPatch { z_order: Some(ZOrder::Back), ..OverlayPatch::default() } };
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({ "action": "overlayUpdated", "fields": { "zOrder": "back" } })
    );
    assert_eq!(serde_json::to_value(&Action::OverlayDeleted).unwrap(), json!({ "action": "overlayDeleted" }));
}

#[test]
fn cursor_helper() {
    assert_eq!(Action::cursor("grab"), Action::SetCursor { cursor: "grab".into() });
    assert_eq!(
        serde_json::to_value(Action::cursor("nwse-resize")).unwrap(),
        json!({ "action": "setCursor", "cursor": "nwse-resize" })
    );
}
