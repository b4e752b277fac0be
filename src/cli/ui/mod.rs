mod field_view;
mod painter;
mod table;

pub(crate) use self::field_view::FieldView;
pub(crate) use self::painter::Painter;
pub(crate) use self::table::Table;
