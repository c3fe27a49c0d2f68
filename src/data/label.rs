//! Display labels for values that are either one string or several.
//!
//! Downstream renderers receive both bare job ids and lists of
//! attributions; this small union makes that distinction explicit
//! instead of switching on a dynamic value.

/// A display value that is either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Single(String),
    Many(Vec<String>),
}

impl Label {
    /// Render the label for human-readable output.
    ///
    /// Lists join with ", ", matching the report formatting.
    pub fn render(&self) -> String {
        match self {
            Label::Single(value) => value.clone(),
            Label::Many(values) => values.join(", "),
        }
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Single(value)
    }
}

impl From<Vec<String>> for Label {
    fn from(values: Vec<String>) -> Self {
        Label::Many(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single() {
        let label = Label::Single("job-a".to_string());
        assert_eq!(label.render(), "job-a");
    }

    #[test]
    fn test_render_many() {
        let label = Label::Many(vec!["job-a".to_string(), "job-b/rev2".to_string()]);
        assert_eq!(label.render(), "job-a, job-b/rev2");
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(Label::Many(Vec::new()).render(), "");
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Label::from("x".to_string()), Label::Single("x".to_string()));
        assert_eq!(
            Label::from(vec!["x".to_string()]),
            Label::Many(vec!["x".to_string()])
        );
    }
}
