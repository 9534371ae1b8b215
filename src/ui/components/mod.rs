mod input;
mod key_result;
mod pagination;
mod search_input;

pub use key_result::KeyResult;
pub use pagination::{draw_pagination, has_next, has_previous};
pub use search_input::{SearchEvent, SearchInput};
