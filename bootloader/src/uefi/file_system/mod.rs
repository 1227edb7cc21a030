mod operations;
mod protocols;

pub use operations::*;
pub use protocols::*;
