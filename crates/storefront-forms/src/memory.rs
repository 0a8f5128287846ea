//! In-memory form
//!
//! A [`FormAccessor`] and [`BannerSurface`] over plain data, for hosts
//! without a document (server-side previews, tests). Cloning a
//! `MemoryForm` clones a handle; all clones see the same form.

use crate::accessor::{FormAccessor, FormHost};
use crate::banner::{Banner, BannerId, BannerSurface};
use crate::state::{FieldId, FieldState};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use storefront_validation::FieldAttributes;

#[derive(Debug, Clone)]
struct Control {
    attributes: FieldAttributes,
    validated: bool,
    value: String,
}

/// Indicators rendered for one tracked field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Indicators {
    field_error: bool,
    group_error: bool,
    group_success: bool,
    error_messages: Vec<String>,
}

/// A banner as placed next to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBanner {
    pub id: BannerId,
    pub banner: Banner,
    pub fading: bool,
}

/// State of the form's submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Default)]
struct FormModel {
    id: String,
    attributes: HashMap<String, String>,
    controls: Vec<Control>,
    indicators: HashMap<FieldId, Indicators>,
    submit: Option<SubmitControl>,
    banners: Vec<PlacedBanner>,
    next_banner: u64,
    scrolled: Vec<FieldId>,
}

impl FormModel {
    /// Index into `controls` of the n-th validated control
    fn validated_index(&self, field: FieldId) -> Option<usize> {
        self.controls
            .iter()
            .enumerate()
            .filter(|(_, control)| control.validated)
            .nth(field.index())
            .map(|(index, _)| index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    inner: Rc<RefCell<FormModel>>,
}

impl MemoryForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FormModel {
                id: id.into(),
                ..FormModel::default()
            })),
        }
    }

    /// Add a control flagged for validation
    pub fn with_field(self, attributes: FieldAttributes, value: impl Into<String>) -> Self {
        self.push(attributes, true, value.into());
        self
    }

    /// Add a named control that is not validated
    pub fn with_plain(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(FieldAttributes::named(name), false, value.into());
        self
    }

    pub fn with_submit(self, label: impl Into<String>) -> Self {
        self.inner.borrow_mut().submit = Some(SubmitControl {
            label: label.into(),
            disabled: false,
        });
        self
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.borrow_mut().attributes.insert(name.into(), value.into());
        self
    }

    fn push(&self, attributes: FieldAttributes, validated: bool, value: String) {
        self.inner.borrow_mut().controls.push(Control {
            attributes,
            validated,
            value,
        });
    }

    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    /// Set the value of every control named `name`
    pub fn set_value(&self, name: &str, value: &str) {
        let mut model = self.inner.borrow_mut();
        for control in model
            .controls
            .iter_mut()
            .filter(|c| c.attributes.name.as_deref() == Some(name))
        {
            control.value = value.to_string();
        }
    }

    /// Value of the first control named `name`
    pub fn get_value(&self, name: &str) -> Option<String> {
        self.value_of(name)
    }

    /// The state currently rendered for a tracked field
    pub fn rendered(&self, field: FieldId) -> FieldState {
        let model = self.inner.borrow();
        match model.indicators.get(&field) {
            Some(ind) if ind.field_error && ind.group_error => ind
                .error_messages
                .first()
                .map(|m| FieldState::Error(m.clone()))
                .unwrap_or_default(),
            Some(ind) if ind.group_success => FieldState::Success,
            _ => FieldState::Neutral,
        }
    }

    /// Number of inline error messages attached beneath a field
    pub fn error_message_count(&self, field: FieldId) -> usize {
        self.inner
            .borrow()
            .indicators
            .get(&field)
            .map_or(0, |ind| ind.error_messages.len())
    }

    pub fn submit_control(&self) -> Option<SubmitControl> {
        self.inner.borrow().submit.clone()
    }

    /// Banners currently next to the form
    pub fn banners(&self) -> Vec<PlacedBanner> {
        self.inner.borrow().banners.clone()
    }

    /// Fields scrolled into view, oldest first
    pub fn scrolled(&self) -> Vec<FieldId> {
        self.inner.borrow().scrolled.clone()
    }

    /// Drop every banner, as if the surrounding markup was replaced
    pub fn clear_banners(&self) {
        self.inner.borrow_mut().banners.clear();
    }
}

impl FormAccessor for MemoryForm {
    fn validated_fields(&self) -> Vec<FieldAttributes> {
        self.inner
            .borrow()
            .controls
            .iter()
            .filter(|c| c.validated)
            .map(|c| c.attributes.clone())
            .collect()
    }

    fn value(&self, field: FieldId) -> String {
        let model = self.inner.borrow();
        model
            .validated_index(field)
            .map(|index| model.controls[index].value.clone())
            .unwrap_or_default()
    }

    fn value_of(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .controls
            .iter()
            .find(|c| c.attributes.name.as_deref() == Some(name))
            .map(|c| c.value.clone())
    }

    fn render(&self, field: FieldId, state: &FieldState) {
        let mut model = self.inner.borrow_mut();
        let indicators = model.indicators.entry(field).or_default();
        *indicators = Indicators::default();
        match state {
            FieldState::Neutral => {}
            FieldState::Error(message) => {
                indicators.field_error = true;
                indicators.group_error = true;
                indicators.error_messages.push(message.clone());
            }
            FieldState::Success => indicators.group_success = true,
        }
    }

    fn scroll_into_view(&self, field: FieldId) {
        self.inner.borrow_mut().scrolled.push(field);
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.inner
            .borrow()
            .controls
            .iter()
            .filter_map(|c| {
                let name = c.attributes.name.as_ref().filter(|n| !n.is_empty())?;
                Some((name.clone(), c.value.clone()))
            })
            .collect()
    }

    fn reset(&self) {
        for control in self.inner.borrow_mut().controls.iter_mut() {
            control.value.clear();
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    fn submit_label(&self) -> Option<String> {
        self.inner.borrow().submit.as_ref().map(|s| s.label.clone())
    }

    fn set_submit_control(&self, disabled: bool, label: &str) {
        if let Some(submit) = self.inner.borrow_mut().submit.as_mut() {
            submit.disabled = disabled;
            submit.label = label.to_string();
        }
    }
}

impl BannerSurface for MemoryForm {
    fn show_banner(&self, banner: &Banner) -> BannerId {
        let mut model = self.inner.borrow_mut();
        model.next_banner += 1;
        let id = BannerId(model.next_banner);
        model.banners.push(PlacedBanner {
            id,
            banner: banner.clone(),
            fading: false,
        });
        id
    }

    fn fade_banner(&self, id: BannerId) -> bool {
        let mut model = self.inner.borrow_mut();
        match model.banners.iter_mut().find(|b| b.id == id) {
            Some(placed) => {
                placed.fading = true;
                true
            }
            None => false,
        }
    }

    fn remove_banner(&self, id: BannerId) -> bool {
        let mut model = self.inner.borrow_mut();
        let before = model.banners.len();
        model.banners.retain(|b| b.id != id);
        model.banners.len() != before
    }
}

/// A page holding in-memory forms
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    forms: Vec<MemoryForm>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: MemoryForm) -> Self {
        self.forms.push(form);
        self
    }
}

impl FormHost for MemoryDocument {
    type Form = MemoryForm;

    fn form(&self, id: &str) -> Option<MemoryForm> {
        self.forms.iter().find(|f| f.inner.borrow().id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> MemoryForm {
        MemoryForm::new("contactForm")
            .with_field(FieldAttributes::named("name").required(), "Asha")
            .with_plain("topic", "orders")
            .with_field(FieldAttributes::named("email").kind("email"), "asha@example.com")
            .with_plain("topic", "returns")
    }

    #[test]
    fn test_field_ids_skip_plain_controls() {
        let form = sample();
        assert_eq!(form.validated_fields().len(), 2);
        assert_eq!(form.value(FieldId::new(1)), "asha@example.com");
        assert_eq!(form.value(FieldId::new(2)), "");
        assert_eq!(form.value_of("topic").as_deref(), Some("orders"));
    }

    #[test]
    fn test_entries_in_document_order() {
        let entries = sample().entries();
        assert_eq!(
            entries,
            vec![
                ("name".to_string(), "Asha".to_string()),
                ("topic".to_string(), "orders".to_string()),
                ("email".to_string(), "asha@example.com".to_string()),
                ("topic".to_string(), "returns".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_replaces_indicators() {
        let form = sample();
        let id = FieldId::new(0);
        form.render(id, &FieldState::Error("Name is required".into()));
        form.render(id, &FieldState::Error("Name is required".into()));
        assert_eq!(form.error_message_count(id), 1);
        form.render(id, &FieldState::Success);
        assert_eq!(form.rendered(id), FieldState::Success);
        assert_eq!(form.error_message_count(id), 0);
    }

    #[test]
    fn test_banner_lifecycle() {
        let form = sample();
        let id = form.show_banner(&Banner::success("Thanks"));
        assert!(form.fade_banner(id));
        assert!(form.banners()[0].fading);
        assert!(form.remove_banner(id));
        assert!(!form.fade_banner(id));
        assert!(!form.remove_banner(id));
    }

    #[test]
    fn test_document_lookup() {
        let doc = MemoryDocument::new().with_form(sample());
        assert!(doc.form("contactForm").is_some());
        assert!(doc.form("newsletter-form").is_none());
    }
}
