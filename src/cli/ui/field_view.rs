use std::fmt::{self, Display, Formatter};

use serde_json::Value;

use super::painter::Painter;
use super::table::Table;
use crate::fields::Field;

/// Renders one decoded field as a heading and a member table.
pub(crate) struct FieldView<'a> {
    painter: &'a Painter,
    field: &'a Field,
}

impl<'a> FieldView<'a> {
    pub(crate) fn new(painter: &'a Painter, field: &'a Field) -> Self {
        Self { painter, field }
    }

    fn rows(&self) -> Vec<(String, String)> {
        let data = match serde_json::to_value(self.field) {
            Ok(mut value) => value.get_mut("data").map(Value::take).unwrap_or(Value::Null),
            Err(error) => return vec![("error".to_string(), error.to_string())],
        };
        match data {
            Value::Object(members) => members
                .into_iter()
                .map(|(name, value)| (name, render_value(&value)))
                .collect(),
            Value::Null => Vec::new(),
            other => vec![("value".to_string(), render_value(&other))],
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Display for FieldView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            self.painter.tag(self.field.tag().to_string()),
            self.painter.heading(self.field.name())
        )?;
        let rows = self.rows();
        if rows.is_empty() {
            return writeln!(f, "{}", self.painter.muted("(no members)"));
        }
        let rows = rows
            .into_iter()
            .map(|(name, value)| (name, self.painter.value(value)))
            .collect();
        writeln!(f, "{}", Table::members(self.painter, rows))
    }
}
