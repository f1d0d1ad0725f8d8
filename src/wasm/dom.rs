use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::error::{SiteError, SiteResult};
use crate::layers::Layer;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub(crate) trait JsResultExt<T> {
    fn js_context(self, what: &str) -> SiteResult<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, what: &str) -> SiteResult<T> {
        self.map_err(|err| SiteError::dom(format!("{what}: {}", describe(&err))))
    }
}

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Thin element factory over the page document.
#[derive(Clone)]
pub(crate) struct Dom {
    document: Document,
}

impl Dom {
    pub(crate) fn new() -> SiteResult<Self> {
        let window = web_sys::window().ok_or_else(|| SiteError::dom("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| SiteError::dom("no document"))?;
        Ok(Self { document })
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn body(&self) -> SiteResult<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| SiteError::dom("document has no body"))
    }

    pub(crate) fn el(&self, tag: &str, class: &str) -> SiteResult<Element> {
        let el = self
            .document
            .create_element(tag)
            .js_context("create_element")?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        Ok(el)
    }

    pub(crate) fn text(&self, tag: &str, class: &str, text: &str) -> SiteResult<Element> {
        let el = self.el(tag, class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    pub(crate) fn svg(&self, tag: &str) -> SiteResult<Element> {
        self.document
            .create_element_ns(Some(SVG_NS), tag)
            .js_context("create_element_ns")
    }

    /// Element carrying a layer's class and stacking contract.
    pub(crate) fn layer(&self, layer: Layer, tag: &str, extra_class: &str) -> SiteResult<Element> {
        let class = if extra_class.is_empty() {
            layer.css_class().to_owned()
        } else {
            format!("{} {extra_class}", layer.css_class())
        };
        let el = self.el(tag, &class)?;
        set_attr(&el, "style", &layer.inline_style())?;
        Ok(el)
    }
}

pub(crate) fn append(parent: &Element, children: &[&Element]) -> SiteResult<()> {
    for child in children {
        parent.append_child(child).js_context("append_child")?;
    }
    Ok(())
}

pub(crate) fn set_attr(el: &Element, name: &str, value: &str) -> SiteResult<()> {
    el.set_attribute(name, value).js_context("set_attribute")
}

pub(crate) fn as_html(el: &Element) -> SiteResult<HtmlElement> {
    el.clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::dom("element is not an HtmlElement"))
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) -> SiteResult<()> {
    el.style()
        .set_property(property, value)
        .js_context("style.set_property")
}
