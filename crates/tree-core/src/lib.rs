mod drop;
mod item;
mod move_ops;

pub use crate::drop::*;
pub use crate::item::*;
pub use crate::move_ops::*;
