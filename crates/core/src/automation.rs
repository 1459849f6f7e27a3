use std::fmt::{Display, Formatter};

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The kind of input a parameter asks for.
///
/// Unknown `type` strings fall back to [`ParameterKind::Text`] so that a newer
/// server never breaks form rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterKind {
    #[default]
    Text,
    TextArea,
    Select,
    Checkbox,
}

impl ParameterKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "textarea" => Self::TextArea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            _ => Self::Text,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }
}

impl<'de> Deserialize<'de> for ParameterKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.map_or(Self::Text, |name| Self::from_name(&name)))
    }
}

impl Serialize for ParameterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A value as it travels over the wire: a string for text-like widgets, a
/// boolean for checkboxes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    /// Truthiness of a checkbox default.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Reads a `default` of any JSON type. Numbers become their text form;
/// arrays and objects are dropped so one odd parameter cannot reject the
/// whole catalog.
fn lenient_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<FieldValue>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Bool(flag)) => Some(FieldValue::Flag(flag)),
        Some(Value::String(text)) => Some(FieldValue::Text(text)),
        Some(Value::Number(number)) => Some(FieldValue::Text(number.to_string())),
        Some(other) => {
            warn!("Ignoring parameter default `{other}`, expected text, a number or a flag");
            None
        }
    })
}

/// Reads select `options`, turning scalar entries into text and skipping
/// anything else.
fn lenient_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Array(entries)) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => Some(text),
                    Value::Number(number) => Some(number.to_string()),
                    Value::Bool(flag) => Some(flag.to_string()),
                    other => {
                        warn!("Ignoring select option `{other}`");
                        None
                    }
                })
                .collect(),
        ),
        Some(other) => {
            warn!("Ignoring select options `{other}`, expected a list");
            None
        }
    })
}

impl Display for FieldValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(flag) => write!(formatter, "{flag}"),
            Self::Text(text) => formatter.write_str(text),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ParameterKind,
    #[serde(default)]
    pub required: bool,
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "lenient_options")]
    pub options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_default")]
    pub default: Option<FieldValue>,
}

impl Parameter {
    /// The label to show, falling back to the name when the server sent none.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

impl Display for Parameter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`", self.name)?;

        if !self.label.is_empty() && self.label != self.name {
            write!(formatter, " ({})", self.label)?;
        }

        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Automation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Display for Automation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let parameter: Parameter =
            serde_json::from_str(r#"{"name": "when", "label": "When", "type": "date"}"#).unwrap();
        assert_eq!(parameter.kind, ParameterKind::Text);
    }

    #[test]
    fn test_missing_type_and_required_default() {
        let parameter: Parameter = serde_json::from_str(r#"{"name": "path"}"#).unwrap();
        assert_eq!(parameter.kind, ParameterKind::Text);
        assert!(!parameter.required);
        assert_eq!(parameter.display_label(), "path");
    }

    #[test]
    fn test_defaults_keep_their_wire_type() {
        let checkbox: Parameter = serde_json::from_str(
            r#"{"name": "dry_run", "label": "Dry run", "type": "checkbox", "default": true}"#,
        )
        .unwrap();
        assert_eq!(checkbox.default, Some(FieldValue::Flag(true)));

        let select: Parameter = serde_json::from_str(
            r#"{"name": "mode", "label": "Mode", "type": "select", "options": ["a", "b"], "default": "b"}"#,
        )
        .unwrap();
        assert_eq!(select.default, Some(FieldValue::Text("b".to_string())));
        assert_eq!(select.options, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_numeric_default_becomes_text() {
        let parameter: Parameter = serde_json::from_str(
            r#"{"name": "retries", "type": "text", "default": 5}"#,
        )
        .unwrap();
        assert_eq!(parameter.default, Some(FieldValue::Text("5".to_string())));

        let parameter: Parameter = serde_json::from_str(
            r#"{"name": "ratio", "type": "text", "default": 0.5}"#,
        )
        .unwrap();
        assert_eq!(parameter.default, Some(FieldValue::Text("0.5".to_string())));
    }

    #[test]
    fn test_odd_default_does_not_reject_catalog() {
        let automations: Vec<Automation> = serde_json::from_str(
            r#"[
                {"id": "a", "name": "A", "parameters": [
                    {"name": "n", "type": "text", "default": {"nested": true}},
                    {"name": "m", "type": "text", "default": null}
                ]},
                {"id": "b", "name": "B", "parameters": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(automations.len(), 2);
        assert_eq!(automations[0].parameters[0].default, None);
        assert_eq!(automations[0].parameters[1].default, None);
    }

    #[test]
    fn test_scalar_options_become_text() {
        let parameter: Parameter = serde_json::from_str(
            r#"{"name": "days", "type": "select", "options": [7, "30", true, [1]], "default": 30}"#,
        )
        .unwrap();
        assert_eq!(
            parameter.options,
            Some(vec!["7".to_string(), "30".to_string(), "true".to_string()])
        );
        assert_eq!(parameter.default, Some(FieldValue::Text("30".to_string())));
    }

    #[test]
    fn test_automation_ignores_server_only_fields() {
        let automation: Automation = serde_json::from_str(
            r#"{"id": "a1", "name": "Organize", "description": "Sort files", "script": "scripts/file_organizer.py", "parameters": []}"#,
        )
        .unwrap();
        assert_eq!(automation.id, "a1");
        assert_eq!(automation.to_string(), "Organize (Sort files)");
    }

    #[test]
    fn test_field_value_truthiness() {
        assert!(FieldValue::Flag(true).is_set());
        assert!(!FieldValue::Flag(false).is_set());
        assert!(FieldValue::Text("True".to_string()).is_set());
        assert!(!FieldValue::Text("yes please".to_string()).is_set());
    }

    #[test]
    fn test_kind_serializes_to_wire_name() {
        let json = serde_json::to_string(&ParameterKind::TextArea).unwrap();
        assert_eq!(json, "\"textarea\"");
    }
}
