//! Text descriptor that goes along with a texture atlas page.
//!
//! ```text
//!
//! textures.png
//! size: 256,256
//! format: RGBA8888
//! filter: Nearest,Nearest
//! repeat: none
//! button
//!   rotate: false
//!   xy: 0, 0
//!   size: 32, 16
//!   split: 5, 5, 5, 4
//!   orig: 32, 16
//!   offset: 0, 0
//!   index: -1
//! ```
pub mod error;
mod nom_helpers;
mod parser;
mod types;
mod utils;
mod writer;

pub use parser::parse_descriptor;
pub use types::*;
pub use writer::{DEFAULT_FILTER, DEFAULT_FORMAT, DEFAULT_REPEAT};
