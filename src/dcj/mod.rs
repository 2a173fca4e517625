pub mod dcj;
pub use dcj::*;
