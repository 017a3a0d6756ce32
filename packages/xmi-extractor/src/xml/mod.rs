//! XML utilities for navigating XMI 1.3 trees.

mod utils;

pub use utils::{
    descendants_with_tag, find_by_path, find_child, find_descendant, get_attribute, get_tag_name,
    has_tag, is_uml_element, owning_element, parse_document,
};
