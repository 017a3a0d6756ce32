//! XMI 1.3 document access: the parsed tree plus its tagged-value side table.

mod document;
mod tagged;

pub use document::XmiDocument;
pub use tagged::TaggedValues;
