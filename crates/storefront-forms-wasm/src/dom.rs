//! `FormAccessor` over a live `<form>` element

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use storefront_forms::{Banner, BannerId, BannerSurface, FieldId, FieldState, FormAccessor, FormHost, Placement};
use storefront_validation::FieldAttributes;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Node, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

const FIELD_SELECTOR: &str = "[data-validate]";
const SUBMIT_SELECTOR: &str = "[type=\"submit\"]";

/// Looks forms up by id in a document
pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The page's document, when running in a window
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl FormHost for DomHost {
    type Form = DomForm;

    fn form(&self, id: &str) -> Option<DomForm> {
        let form = self
            .document
            .get_element_by_id(id)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(DomForm::new(form))
    }
}

/// One bound form. Fields and the submit control are captured on creation.
pub struct DomForm {
    form: HtmlFormElement,
    fields: Vec<Element>,
    submit: Option<Element>,
    banners: RefCell<HashMap<BannerId, Element>>,
    next_banner: Cell<u64>,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        let fields = query_all(&form, FIELD_SELECTOR);
        let submit = form.query_selector(SUBMIT_SELECTOR).ok().flatten();
        Self {
            form,
            fields,
            submit,
            banners: RefCell::new(HashMap::new()),
            next_banner: Cell::new(0),
        }
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    /// Tracked field elements, in document order
    pub fn field_elements(&self) -> &[Element] {
        &self.fields
    }

    fn document(&self) -> Option<Document> {
        self.form.owner_document()
    }
}

impl FormAccessor for DomForm {
    fn validated_fields(&self) -> Vec<FieldAttributes> {
        self.fields.iter().map(read_attributes).collect()
    }

    fn value(&self, field: FieldId) -> String {
        self.fields
            .get(field.index())
            .map(control_value)
            .unwrap_or_default()
    }

    fn value_of(&self, name: &str) -> Option<String> {
        let selector = format!("[name=\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\""));
        let element = self.form.query_selector(&selector).ok().flatten()?;
        Some(control_value(&element))
    }

    fn render(&self, field: FieldId, state: &FieldState) {
        let Some(element) = self.fields.get(field.index()) else {
            return;
        };
        let group = group_of(element);

        // Retire whatever the field showed before
        let _ = element.class_list().remove_1("error");
        if let Some(group) = &group {
            if let Ok(Some(message)) = group.query_selector(".error-message") {
                message.remove();
            }
            let _ = group.class_list().remove_2("has-error", "has-success");
        }

        match state {
            FieldState::Neutral => {}
            FieldState::Error(text) => {
                let _ = element.class_list().add_1("error");
                let Some(group) = group else {
                    return;
                };
                let _ = group.class_list().add_1("has-error");
                if let Some(document) = self.document() {
                    if let Ok(message) = document.create_element("div") {
                        message.set_class_name("error-message");
                        message.set_text_content(Some(text.as_str()));
                        let _ = group.append_child(&message);
                    }
                }
            }
            FieldState::Success => {
                if let Some(group) = group {
                    let _ = group.class_list().add_1("has-success");
                }
            }
        }
    }

    fn scroll_into_view(&self, field: FieldId) {
        if let Some(element) = self.fields.get(field.index()) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Center);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn entries(&self) -> Vec<(String, String)> {
        let Ok(data) = FormData::new_with_form(&self.form) else {
            return Vec::new();
        };
        let Ok(Some(iter)) = js_sys::try_iter(data.as_ref()) else {
            return Vec::new();
        };

        iter.filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = entry.dyn_into::<js_sys::Array>().ok()?;
                // File inputs yield Blobs; only text values are collected
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.form.get_attribute(name)
    }

    fn submit_label(&self) -> Option<String> {
        self.submit.as_ref().map(Element::inner_html)
    }

    fn set_submit_control(&self, disabled: bool, label: &str) {
        let Some(submit) = &self.submit else {
            return;
        };
        if disabled {
            let _ = submit.set_attribute("disabled", "");
        } else {
            let _ = submit.remove_attribute("disabled");
        }
        submit.set_inner_html(label);
    }
}

impl BannerSurface for DomForm {
    fn show_banner(&self, banner: &Banner) -> BannerId {
        let id = BannerId(self.next_banner.get() + 1);
        self.next_banner.set(id.0);

        let (Some(document), Some(parent)) = (self.document(), self.form.parent_node()) else {
            return id;
        };
        let Ok(element) = document.create_element("div") else {
            return id;
        };
        element.set_class_name(banner.class_name());
        element.set_text_content(Some(banner.message.as_str()));

        let anchor: Option<Node> = match banner.placement {
            Placement::BeforeForm => Some(self.form.clone().into()),
            Placement::AfterForm => self.form.next_sibling(),
        };
        if parent.insert_before(&element, anchor.as_ref()).is_ok() {
            self.banners.borrow_mut().insert(id, element);
        }
        id
    }

    fn fade_banner(&self, id: BannerId) -> bool {
        let mut banners = self.banners.borrow_mut();
        let element = match banners.get(&id) {
            Some(element) if element.is_connected() => element.clone(),
            _ => {
                banners.remove(&id);
                return false;
            }
        };
        let _ = element.class_list().add_1("fade-out");
        true
    }

    fn remove_banner(&self, id: BannerId) -> bool {
        match self.banners.borrow_mut().remove(&id) {
            Some(element) if element.is_connected() => {
                element.remove();
                true
            }
            _ => false,
        }
    }
}

fn query_all(root: &HtmlFormElement, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `.form-group` around the field, else its parent
fn group_of(element: &Element) -> Option<Element> {
    element
        .closest(".form-group")
        .ok()
        .flatten()
        .or_else(|| element.parent_element())
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn read_attributes(element: &Element) -> FieldAttributes {
    FieldAttributes {
        name: element.get_attribute("name"),
        kind: element.get_attribute("type"),
        required: element.has_attribute("required"),
        minlength: element.get_attribute("minlength"),
        maxlength: element.get_attribute("maxlength"),
        pattern: element.get_attribute("pattern"),
        pattern_message: element.get_attribute("data-pattern-message"),
        confirm: element.get_attribute("data-confirm"),
    }
}
