//! XML utilities for navigating JATS source trees.

mod utils;

pub use utils::{
    child_inner_text, element_children, find_child, find_children, get_tag_name, inner_text,
};
