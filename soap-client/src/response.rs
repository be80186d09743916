//! Typed named-field access to a parsed action response

use xmltree::Element;

/// A parsed `<ActionNameResponse>` element with typed field lookup
///
/// Fields are looked up by argument name. Every getter is "typed or
/// absent": a field that is missing, empty where a value is required, or
/// not parseable as the requested type yields `None`. Deciding whether an
/// absent field is an error belongs to the caller.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    element: Element,
}

impl SoapResponse {
    /// Wrap an already-parsed response element
    ///
    /// Exposed so callers and tests can build responses without going
    /// through an HTTP exchange.
    pub fn from_element(element: Element) -> Self {
        Self { element }
    }

    /// Name of the wrapped response element (e.g. `TimeResponse`)
    pub fn action_response_name(&self) -> &str {
        &self.element.name
    }

    /// Get a field as a string
    ///
    /// An element that is present but empty yields an empty string.
    pub fn get_str(&self, name: &str) -> Option<String> {
        let child = self.element.get_child(name)?;
        Some(
            child
                .get_text()
                .map(|t| t.into_owned())
                .unwrap_or_default(),
        )
    }

    /// Get a field as a signed integer
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_str(name)?.trim().parse().ok()
    }

    /// Get a field as an unsigned integer
    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get_str(name)?.trim().parse().ok()
    }

    /// Get a field as a boolean
    ///
    /// UPnP devices are inconsistent here: `0`/`1`, `true`/`false` and
    /// `yes`/`no` are all seen in the wild, in varying case.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        let raw = self.get_str(name)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }
}
