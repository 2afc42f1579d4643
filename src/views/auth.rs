// ============================================================================
// AUTH VIEWS - Login and registration forms
// ============================================================================
// Errors are written straight into the form so typed values survive.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use crate::dom::{get_element_by_id, on_event, ElementBuilder};
use crate::routing::Route;
use crate::viewmodels::AuthViewModel;

const EMAIL_ID: &str = "auth-email";
const PASSWORD_ID: &str = "auth-password";
const ERROR_ID: &str = "auth-error";
const SUBMIT_ID: &str = "auth-submit";

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

pub fn render_login(vm: &AuthViewModel) -> Result<Element, JsValue> {
    render_form(vm, AuthMode::Login)
}

pub fn render_register(vm: &AuthViewModel) -> Result<Element, JsValue> {
    render_form(vm, AuthMode::Register)
}

fn render_form(vm: &AuthViewModel, mode: AuthMode) -> Result<Element, JsValue> {
    let (title, action, switch_text, switch_route) = match mode {
        AuthMode::Login => ("Login", "Sign in", "No account yet? Register", Route::Register),
        AuthMode::Register => ("Register", "Create account", "Already registered? Login", Route::Login),
    };

    let email = ElementBuilder::new("input")?
        .id(EMAIL_ID)?
        .attr("type", "email")?
        .attr("placeholder", "Email")?
        .attr("autocomplete", "username")?
        .build();
    let password = ElementBuilder::new("input")?
        .id(PASSWORD_ID)?
        .attr("type", "password")?
        .attr("placeholder", "Password")?
        .build();
    let error = ElementBuilder::new("p")?.id(ERROR_ID)?.class("form-error").build();
    let submit = ElementBuilder::new("button")?
        .id(SUBMIT_ID)?
        .attr("type", "submit")?
        .text(action)
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(email)?
        .child(password)?
        .child(error)?
        .child(submit)?
        .build();

    {
        let vm = vm.clone();
        on_event(&form, "submit", move |event| {
            event.prevent_default();
            let email = input_value(EMAIL_ID);
            let password = input_value(PASSWORD_ID);
            let vm = vm.clone();
            set_busy(true);
            spawn_local(async move {
                let result = match mode {
                    AuthMode::Login => vm.login(&email, &password).await,
                    AuthMode::Register => vm.register(&email, &password).await,
                };
                set_busy(false);
                match result {
                    Ok(()) => show_error(""),
                    Err(e) => show_error(&e.to_string()),
                }
            });
        })?;
    }

    let switch = ElementBuilder::new("a")?
        .attr("href", &format!("#{}", switch_route.path()))?
        .class("auth-switch")
        .text(switch_text)
        .build();

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(ElementBuilder::new("h1")?.text("WildGuard").build())?
        .child(form)?
        .child(switch)?
        .build())
}

fn input_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn show_error(message: &str) {
    if let Some(el) = get_element_by_id(ERROR_ID) {
        el.set_text_content(Some(message));
    }
}

fn set_busy(busy: bool) {
    if let Some(button) = get_element_by_id(SUBMIT_ID).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()) {
        button.set_disabled(busy);
    }
}
