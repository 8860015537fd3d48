mod repository;
pub mod view;

pub use repository::{sort_by_recency, NoteRepository};
pub use view::{filter, resolve_selected};
