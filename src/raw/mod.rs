mod arena;
mod handle;
mod node;
mod raw_tree;

pub(crate) use handle::Handle;
pub use handle::NodeHandle;
pub(crate) use raw_tree::RawTree;
