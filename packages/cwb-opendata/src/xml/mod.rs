//! XML navigation helpers.

mod utils;

pub use utils::{
    find_by_path, find_child, find_children, find_descendants, get_tag_name, get_text, has_tag,
    text_at,
};
