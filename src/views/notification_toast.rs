// ============================================================================
// NOTIFICATION TOAST
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::viewmodels::NotificationCenter;

pub fn render_toast(notifications: &NotificationCenter) -> Result<Option<Element>, JsValue> {
    let Some(notification) = notifications.current() else {
        return Ok(None);
    };

    let close = ElementBuilder::new("button")?
        .class("toast-close")
        .attr("aria-label", "Dismiss")?
        .text("×")
        .build();
    {
        let notifications = notifications.clone();
        on_click(&close, move |_| notifications.dismiss())?;
    }

    let toast = ElementBuilder::new("div")?
        .class(notification.css_class())
        .attr("role", "status")?
        .child(ElementBuilder::new("span")?.text(&notification.message).build())?
        .child(close)?
        .build();
    Ok(Some(toast))
}
