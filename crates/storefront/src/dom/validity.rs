//! Constraint validation for form controls (`form.checkValidity()`).
//!
//! Covers the constraints storefront markup actually uses: `required`,
//! numeric `min`/`max` on number inputs, and the basic shape of email
//! inputs. Disabled controls are skipped.

use super::{Document, Element, ElementId};

impl Document {
    /// Whether every control owned by `form` satisfies its constraints.
    ///
    /// A form that is no longer in the document is reported invalid.
    #[must_use]
    pub fn check_validity(&self, form: ElementId) -> bool {
        if !self.contains(form) {
            return false;
        }
        self.form_controls(form)
            .into_iter()
            .filter_map(|id| self.get(id))
            .all(Element::is_valid)
    }
}

impl Element {
    /// Whether this control satisfies its own constraints.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.has_attr("disabled") || !is_validatable(self.tag()) {
            return true;
        }

        let value = self.value();
        if value.is_empty() {
            return !self.has_attr("required");
        }

        match self.attr("type").unwrap_or("text") {
            "number" | "range" => self.number_in_range(value),
            "email" => looks_like_email(value),
            _ => true,
        }
    }

    fn number_in_range(&self, value: &str) -> bool {
        let Ok(number) = value.trim().parse::<f64>() else {
            return false;
        };
        let bound = |name: &str| self.attr(name).and_then(|raw| raw.trim().parse::<f64>().ok());

        bound("min").is_none_or(|min| number >= min) && bound("max").is_none_or(|max| number <= max)
    }
}

fn is_validatable(tag: &str) -> bool {
    matches!(tag, "input" | "select" | "textarea")
}

fn looks_like_email(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'))
}
