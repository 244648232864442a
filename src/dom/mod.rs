//! Retained element tree standing in for the overlay page.
//!
//! Widgets never hold references into the tree: they resolve their anchors
//! by id on every call and skip the update when the anchor is absent.

pub mod escape;
pub mod layout;

use escape::escape_html;

/// Class toggled on anchors that are currently not displayed.
pub const HIDDEN: &str = "hidden";

/// A single node of the overlay document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            styles: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds every whitespace-separated class of `classes`.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn remove_classes(&mut self, classes: &[&str]) {
        self.classes.retain(|c| !classes.contains(&c.as_str()));
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[cfg(test)]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Adds or removes `hidden`.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.remove_class(HIDDEN);
        } else {
            self.add_class(HIDDEN);
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.has_class(HIDDEN)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.styles.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value,
            None => self.styles.push((property.to_string(), value)),
        }
    }

    #[cfg(test)]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the whole content of the element with plain text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.children.clear();
    }

    #[cfg(test)]
    /// Text of this element and all of its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    #[cfg(test)]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn prepend_child(&mut self, child: Element) {
        self.children.insert(0, child);
    }

    /// Drops children from the tail until at most `len` remain.
    pub fn truncate_children(&mut self, len: usize) {
        self.children.truncate(len);
    }

    /// Removes a direct child by id. Returns whether anything was removed.
    pub fn remove_child_by_id(&mut self, id: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.id.as_deref() != Some(id));
        before != self.children.len()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if let Some(id) = &self.id {
            out.push_str(" id=\"");
            out.push_str(&escape_html(id));
            out.push('"');
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_html(&self.classes.join(" ")));
            out.push('"');
        }
        if !self.styles.is_empty() {
            let style: Vec<String> = self
                .styles
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect();
            out.push_str(" style=\"");
            out.push_str(&escape_html(&style.join("; ")));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape_html(&self.text));
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// The overlay document: a single root element and lookups by anchor id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The standard overlay page exposing every anchor the widgets use.
    pub fn overlay() -> Self {
        Self::new(layout::overlay_page())
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[cfg(test)]
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.root.write_html(&mut out);
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::overlay()
    }
}
