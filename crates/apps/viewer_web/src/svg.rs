use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlObjectElement};

use overlays::LinesLookup;
use runtime::StyleTarget;

/// The floor-plan SVG embedded through an `<object>` element in the host
/// page. Looked up on every call because the object reloads its document
/// whenever the level changes.
#[derive(Debug, Clone)]
pub struct SvgDocumentTarget {
    object_id: String,
    style_node_id: String,
}

impl SvgDocumentTarget {
    pub fn new(object_id: impl Into<String>, style_node_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            style_node_id: style_node_id.into(),
        }
    }

    fn content_document(&self) -> Option<Document> {
        let host = web_sys::window()?.document()?;
        let object: HtmlObjectElement = host.get_element_by_id(&self.object_id)?.dyn_into().ok()?;
        object.content_document()
    }
}

impl LinesLookup for SvgDocumentTarget {
    fn element_ids_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(document) = self.content_document() else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all(&format!("g[id^=\"{prefix}\"]")) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| element.id())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl StyleTarget for SvgDocumentTarget {
    fn apply_stylesheet(&mut self, css: &str) {
        let node = self
            .content_document()
            .and_then(|document| document.get_element_by_id(&self.style_node_id));
        match node {
            Some(node) => node.set_text_content(Some(css)),
            None => web_sys::console::log_1(&JsValue::from_str(&format!(
                "style node #{} not found in #{}",
                self.style_node_id, self.object_id
            ))),
        }
    }
}
