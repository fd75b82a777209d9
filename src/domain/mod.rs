pub mod common;
pub mod fields;
pub mod record;
pub mod source;
pub mod validators;

pub use common::{Entry, NamedEntity};
pub use fields::{Amount, Category, Description, Name, RecordDate};
pub use record::Record;
pub use source::Source;
pub use validators::{FieldValidator, ValidationError, Validators};
