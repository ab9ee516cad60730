//! Text editing primitives.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
