// ============================================================================
// EVENT HANDLING
// ============================================================================
// Element listeners live until the next render replaces the tree; the app
// calls `release_element_listeners` right before it clears the root.
// Window listeners are registered once at startup and kept for good.
// ============================================================================

use std::any::Any;
use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, MouseEvent, Window};

thread_local! {
    static ELEMENT_LISTENERS: RefCell<Vec<Box<dyn Any>>> = RefCell::new(Vec::new());
}

fn keep_until_next_render<T: ?Sized + 'static>(closure: Closure<T>) {
    ELEMENT_LISTENERS.with(|listeners| listeners.borrow_mut().push(Box::new(closure)));
}

/// Drops the listeners of the tree that is about to be removed.
pub fn release_element_listeners() -> usize {
    let released = ELEMENT_LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    released.len()
}

pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    keep_until_next_render(closure);
    Ok(())
}

pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    keep_until_next_render(closure);
    Ok(())
}

/// `dragover`, `dragleave` and `drop` all go through here.
pub fn on_drag<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(DragEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(DragEvent)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    keep_until_next_render(closure);
    Ok(())
}

/// For listeners that outlive every render.
pub fn on_window_event<F>(window: &Window, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
