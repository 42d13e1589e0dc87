mod attachment;
mod command;
mod compose;
mod error;
mod service;
mod value_object;

pub use attachment::*;
pub use command::*;
pub use compose::*;
pub use error::*;
pub use service::*;
pub use value_object::*;
