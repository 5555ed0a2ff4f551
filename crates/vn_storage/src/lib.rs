pub mod backends;

pub use backends::*;

pub mod prelude {
    pub use super::backends::*;
    pub use vn_core::{NewsStore, Result};
}
