use std::fmt::{self, Display, Formatter};

use tabled::{builder::Builder, settings::Style as TableStyle};

use super::painter::Painter;
use crate::protocol::TagInfo;

/// Rounded table of painted cells, rendered via `Display`.
#[derive(Debug)]
pub(crate) struct Table {
    headers: [&'static str; 2],
    rows: Vec<[String; 2]>,
}

impl Table {
    /// Lists catalog entries as tag and name columns.
    pub(crate) fn catalog<'a>(
        painter: &Painter,
        entries: impl IntoIterator<Item = &'a TagInfo>,
    ) -> Self {
        let rows = entries
            .into_iter()
            .map(|info| [painter.tag(info.tag.to_string()), info.name.to_string()])
            .collect();
        Self {
            headers: ["tag", "name"],
            rows,
        }
    }

    /// Lists the members of one decoded field. Member names are muted;
    /// values are used as given.
    pub(crate) fn members<K: AsRef<str>>(painter: &Painter, members: Vec<(K, String)>) -> Self {
        let rows = members
            .into_iter()
            .map(|(member, value)| [painter.muted(member), value])
            .collect();
        Self {
            headers: ["member", "value"],
            rows,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.headers);
        for row in &self.rows {
            builder.push_record(row);
        }
        let mut table = builder.build();
        table.with(TableStyle::rounded());
        write!(f, "{table}")
    }
}
