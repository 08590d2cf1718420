mod alert;
mod button;
mod field;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::Button;
pub(crate) use field::{Select, TextArea, TextInput};
