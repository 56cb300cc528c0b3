mod formatter;

pub use formatter::{format_branch_list, format_catalog, should_use_colors};
