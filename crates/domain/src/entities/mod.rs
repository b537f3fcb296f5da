//! 核心实体定义

pub mod message;
pub mod profile;
pub mod room;
pub mod session;
pub mod signup;

pub use message::*;
pub use profile::*;
pub use room::*;
pub use session::*;
pub use signup::*;
