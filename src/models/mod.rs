pub mod form;
pub mod image;
pub mod mode;
pub mod request;
pub mod social;
pub mod style;

pub use form::*;
pub use image::*;
pub use mode::*;
pub use request::*;
pub use social::*;
pub use style::*;
