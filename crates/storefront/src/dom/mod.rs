//! In-memory document model.
//!
//! A flat list of elements in document order. Only the parts of the DOM the
//! interaction layer reads or writes are modelled: attributes (including
//! `data-*`), the class list, form control values, owning forms, and the
//! rendered markup of inserted banners.
//!
//! Element ids are never reused: removing an element leaves a tombstone so
//! that handles held by listeners or timers stay unambiguous.

mod validity;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Position in document order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    value: String,
    text: String,
    html: Option<String>,
    form: Option<ElementId>,
}

impl Element {
    /// Create an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            value: String::new(),
            text: String::new(),
            html: None,
            form: None,
        }
    }

    /// Shorthand for `<input type="...">`.
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self::new("input").with_attr("type", input_type)
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Set the `name` attribute.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_attr("name", name)
    }

    /// Set a `data-*` attribute; `key` is given without the prefix.
    #[must_use]
    pub fn with_data(self, key: &str, value: impl Into<String>) -> Self {
        self.with_attr(&format!("data-{key}"), value)
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set the current value of a form control.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark a form control as `required`.
    #[must_use]
    pub fn required(self) -> Self {
        self.with_attr("required", "")
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the rendered markup.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present (boolean attributes like `required`).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// `id` attribute.
    #[must_use]
    pub fn dom_id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// `name` attribute.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    /// `data-*` attribute; `key` is given without the prefix.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    /// Class list in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present. Returns whether it was added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Current value of a form control.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the current value of a form control.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered markup, for elements inserted from a template.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Owning form, for form controls.
    #[must_use]
    pub const fn form(&self) -> Option<ElementId> {
        self.form
    }
}

/// The document: every element of the page body, in document order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Option<Element>>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the end of the body.
    pub fn append(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Some(element));
        id
    }

    /// Append a control owned by `form`.
    ///
    /// Returns `None` if `form` is not a live `<form>` element.
    pub fn append_to_form(&mut self, form: ElementId, mut control: Element) -> Option<ElementId> {
        if self.get(form)?.tag() != "form" {
            return None;
        }
        control.form = Some(form);
        Some(self.append(control))
    }

    /// Look up a live element.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Look up a live element mutably.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether the element is still in the document.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an element. Controls owned by a removed form stay in place,
    /// detached from it.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.nodes.get_mut(id.0).and_then(Option::take)?;
        for element in self.nodes.iter_mut().flatten() {
            if element.form == Some(id) {
                element.form = None;
            }
        }
        Some(removed)
    }

    /// Live elements in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.as_ref().map(|element| (ElementId(index), element)))
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the document has no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All elements carrying `class`, in document order (`querySelectorAll(".class")`).
    #[must_use]
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, element)| element.has_class(class))
            .map(|(id, _)| id)
            .collect()
    }

    /// First element carrying `class` (`querySelector(".class")`).
    #[must_use]
    pub fn first_with_class(&self, class: &str) -> Option<ElementId> {
        self.iter()
            .find(|(_, element)| element.has_class(class))
            .map(|(id, _)| id)
    }

    /// Element with the given `id` attribute (`querySelector("#id")`).
    #[must_use]
    pub fn by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.iter()
            .find(|(_, element)| element.dom_id() == Some(dom_id))
            .map(|(id, _)| id)
    }

    /// Controls owned by `form`, in document order.
    #[must_use]
    pub fn form_controls(&self, form: ElementId) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, element)| element.form == Some(form))
            .map(|(id, _)| id)
            .collect()
    }

    /// First `<input>` in `form` with the given `name` (`form.querySelector('input[name="..."]')`).
    #[must_use]
    pub fn named_input(&self, form: ElementId, name: &str) -> Option<ElementId> {
        self.iter()
            .find(|(_, element)| {
                element.form == Some(form) && element.tag() == "input" && element.name() == Some(name)
            })
            .map(|(id, _)| id)
    }

    /// Set the value of a form control. Returns `false` if the element is gone.
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) -> bool {
        self.get_mut(id).map(|element| element.set_value(value)).is_some()
    }

    /// Add a class to an element. Returns `false` if the element is gone.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        self.get_mut(id).map(|element| element.add_class(class)).is_some()
    }
}
