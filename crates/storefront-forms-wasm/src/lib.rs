//! Storefront Forms WASM
//!
//! Binds the storefront form validator to live page forms. Scripts either
//! construct a validator per form:
//!
//! ```javascript
//! import init, { FormValidator, attachKnownForms } from './storefront_forms_wasm.js';
//! await init();
//! new FormValidator('contactForm', { successMessage: 'Thanks, we will be in touch!' });
//! // or bind every storefront form present on the page
//! attachKnownForms();
//! ```
//!
//! or call the stateless `validateField` / `isValidEmail` helpers directly.

pub mod dom;
pub mod runtime;

use std::rc::Rc;
use storefront_forms as engine;
use storefront_forms::{FieldId, FormConfig, SimulatedSubmitter};
use storefront_validation::{check_field, FieldAttributes, FieldConstraints};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

pub use dom::{DomForm, DomHost};
pub use runtime::BrowserRuntime;

type DomValidator = engine::FormValidator<DomForm, SimulatedSubmitter<BrowserRuntime>, BrowserRuntime>;

/// Forms the storefront pages may carry
const KNOWN_FORMS: [&str; 4] = ["contactForm", "newsletter-form", "register-form", "login-form"];

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validator bound to one page form
#[wasm_bindgen]
pub struct FormValidator {
    inner: Rc<DomValidator>,
}

#[wasm_bindgen]
impl FormValidator {
    /// Bind to the form with id `formId`.
    ///
    /// `options` is an optional object overriding timings and texts
    /// (`submitDelayMs`, `bannerVisibleMs`, `bannerFadeMs`, `loadingLabel`,
    /// `successMessage`, `errorMessage`, `defaultFieldName`). A missing form
    /// yields an inert validator rather than an error.
    #[wasm_bindgen(constructor)]
    pub fn new(form_id: &str, options: JsValue) -> Result<FormValidator, JsValue> {
        let config = if options.is_undefined() || options.is_null() {
            FormConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid form options: {}", e)))?
        };

        Ok(Self {
            inner: attach(form_id, config)?,
        })
    }

    #[wasm_bindgen(getter, js_name = isInert)]
    pub fn is_inert(&self) -> bool {
        self.inner.is_inert()
    }

    #[wasm_bindgen(getter, js_name = fieldCount)]
    pub fn field_count(&self) -> usize {
        self.inner.field_count()
    }

    /// Validate and render every field, as a submit attempt would
    #[wasm_bindgen(js_name = validateAll)]
    pub fn validate_all(&self) -> bool {
        let mut all_valid = true;
        for index in 0..self.inner.field_count() {
            all_valid &= self.inner.validate_field(FieldId::new(index));
        }
        all_valid
    }

    /// Stop handling events and cancel pending banner dismissals.
    ///
    /// Call before removing the form from the page.
    pub fn detach(&self) {
        self.inner.detach();
    }
}

/// Bind a validator to each storefront form present on the page.
///
/// Returns how many forms were found.
#[wasm_bindgen(js_name = attachKnownForms)]
pub fn attach_known_forms() -> Result<u32, JsValue> {
    let mut attached = 0;
    for form_id in KNOWN_FORMS {
        let validator = attach(form_id, FormConfig::default())?;
        if !validator.is_inert() {
            attached += 1;
        }
    }
    Ok(attached)
}

fn attach(form_id: &str, config: FormConfig) -> Result<Rc<DomValidator>, JsValue> {
    let runtime = BrowserRuntime;
    let submitter = SimulatedSubmitter::new(runtime, config.submit_delay());

    let Some(host) = DomHost::current() else {
        debug!(form = form_id, "no document; validator is inert");
        return Ok(Rc::new(DomValidator::inert(submitter, runtime, config)));
    };

    let validator = Rc::new(DomValidator::attach(&host, form_id, submitter, runtime, config));
    if let Some(form) = validator.form().cloned() {
        bind_listeners(&validator, &form)?;
    }
    Ok(validator)
}

/// Wire blur/input on each tracked field and submit on the form.
///
/// Listeners live for the rest of the page session.
fn bind_listeners(validator: &Rc<DomValidator>, form: &DomForm) -> Result<(), JsValue> {
    for (index, element) in form.field_elements().iter().enumerate() {
        let field = FieldId::new(index);

        let v = Rc::clone(validator);
        let on_blur = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            v.handle_blur(field);
        });
        element.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;
        on_blur.forget();

        let v = Rc::clone(validator);
        let on_input = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            v.handle_input(field);
        });
        element.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }

    let v = Rc::clone(validator);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let v = Rc::clone(&v);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = v.handle_submit().await;
            debug!(?outcome, "submit handled");
        });
    });
    form.element()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(())
}

/// Validate a single value without a form
///
/// # Arguments
/// * `field_name` - Name used in messages when `rules` has no `name`
/// * `value` - The value to validate (trimmed before checking)
/// * `rules` - Attribute object: `required`, `minlength`, `maxlength`,
///   `pattern`, `patternMessage`, `type`, `confirm`
/// * `confirm_value` - Current value of the field named by `confirm`
///
/// # Returns
/// The error message, or `undefined` when the value is valid
///
/// # Example (JavaScript)
/// ```javascript
/// const error = validateField('email', 'bob@', { type: 'email', required: true });
/// // "Please enter a valid email address"
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(
    field_name: &str,
    value: &str,
    rules: JsValue,
    confirm_value: Option<String>,
) -> Result<Option<String>, JsValue> {
    let mut attrs: FieldAttributes = if rules.is_undefined() || rules.is_null() {
        FieldAttributes::default()
    } else {
        serde_wasm_bindgen::from_value(rules)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?
    };
    if attrs.name.is_none() {
        attrs.name = Some(field_name.to_string());
    }

    let constraints = FieldConstraints::from_attributes(&attrs);
    Ok(check_field(&constraints, value, confirm_value.as_deref())
        .err()
        .map(|e| e.to_string()))
}

/// Quick email shape check
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    storefront_validation::is_valid_email(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(is_valid_email_js("user@example.com"));
        assert!(!is_valid_email_js("bob@"));
    }

    #[wasm_bindgen_test]
    fn test_validate_field_without_rules() {
        assert_eq!(validate_field("notes", "", JsValue::UNDEFINED, None).unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_validate_field_numeric_length() {
        let rules = js_sys::Object::new();
        js_sys::Reflect::set(&rules, &"minlength".into(), &JsValue::from_f64(3.0)).unwrap();
        let error = validate_field("code", "ab", rules.into(), None).unwrap();
        assert_eq!(error.as_deref(), Some("code must be at least 3 characters"));
    }

    #[wasm_bindgen_test]
    fn test_validate_field_confirmation() {
        let rules = js_sys::Object::new();
        js_sys::Reflect::set(&rules, &"confirm".into(), &"password".into()).unwrap();
        let error = validate_field("password2", "Secret2", rules.into(), Some("Secret1".into())).unwrap();
        assert_eq!(error.as_deref(), Some("Passwords do not match"));
    }
}
