pub mod category;
pub use category::*;

pub mod histogram;
pub use histogram::*;

pub mod node;
pub use node::*;

pub mod tree;
pub use tree::*;
