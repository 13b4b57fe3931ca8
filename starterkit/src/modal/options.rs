//! Modal option maps and typed option builders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options passed to a modal.
///
/// The registry never interprets option contents; it only merges and
/// forwards them to the modal component.
pub type ModalOptions = Map<String, Value>;

/// Merge `overrides` over `base`. Keys in `overrides` win.
pub fn merge_over(base: &mut ModalOptions, overrides: ModalOptions) {
    for (key, value) in overrides {
        base.insert(key, value);
    }
}

/// Merge `defaults` under `base`. Only keys missing from `base` are added.
pub fn merge_under(base: &mut ModalOptions, defaults: ModalOptions) {
    for (key, value) in defaults {
        base.entry(key).or_insert(value);
    }
}

/// Button color for the confirm action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmColor {
    #[default]
    Primary,
    Error,
    Warning,
    Success,
    Neutral,
}

/// Options understood by the standard confirmation modal.
///
/// Converts into [`ModalOptions`] with camelCase keys, the shape the
/// modal component reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_color: Option<ConfirmColor>,
    /// Z-index for stacking modals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Additional CSS classes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl ConfirmOptions {
    /// Create confirm options with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Set a custom title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the confirm and cancel button labels.
    pub fn buttons(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_text = Some(confirm.into());
        self.cancel_text = Some(cancel.into());
        self
    }

    pub fn color(mut self, color: ConfirmColor) -> Self {
        self.confirm_color = Some(color);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }
}

impl From<ConfirmOptions> for ModalOptions {
    fn from(options: ConfirmOptions) -> Self {
        match serde_json::to_value(options) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ModalOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_merge_over_overrides_existing_keys() {
        let mut base = map(json!({ "a": 1, "b": 2 }));
        merge_over(&mut base, map(json!({ "b": 3, "c": 4 })));
        assert_eq!(Value::Object(base), json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn test_merge_under_keeps_existing_keys() {
        let mut base = map(json!({ "x": 1 }));
        merge_under(&mut base, map(json!({ "x": 9, "y": 2 })));
        assert_eq!(Value::Object(base), json!({ "x": 1, "y": 2 }));
    }

    #[test]
    fn test_confirm_options_use_camel_case_keys() {
        let options: ModalOptions = ConfirmOptions::new("Delete this item?")
            .title("Warning")
            .buttons("Delete", "Keep")
            .color(ConfirmColor::Error)
            .z_index(50)
            .into();

        assert_eq!(
            Value::Object(options),
            json!({
                "title": "Warning",
                "message": "Delete this item?",
                "confirmText": "Delete",
                "cancelText": "Keep",
                "confirmColor": "error",
                "zIndex": 50,
            })
        );
    }

    #[test]
    fn test_confirm_options_skip_unset_fields() {
        let options: ModalOptions = ConfirmOptions::default().into();
        assert!(options.is_empty());
    }
}
