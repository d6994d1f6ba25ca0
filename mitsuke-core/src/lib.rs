pub mod binary;
pub mod container;
pub mod format;
pub mod header;
mod identify;
pub mod magic;
pub mod object_store;
pub mod view;

pub use binary::*;
pub use format::*;
pub use identify::identify;
pub use view::{ByteView, Endian};
