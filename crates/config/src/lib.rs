//! Typed configuration for the In Digits site.
//!
//! A configuration source (YAML or a file of `NAME = literal` declarations) is read once into a
//! [`Config`], validated key by key, and then handed to the renderer as an immutable value.

mod config;
mod decode;
mod feeds;
mod links;
mod pagination;
mod site;
mod sitemap;
mod theme;
mod urls;

pub mod declarations;
pub mod path;
pub mod profile;

pub use self::config::*;
pub use self::decode::InvalidValue;
pub use self::feeds::*;
pub use self::links::*;
pub use self::pagination::*;
pub use self::site::*;
pub use self::sitemap::*;
pub use self::theme::*;
pub use self::urls::*;

pub type Status = status::Status;
pub type Result<T, E = Status> = std::result::Result<T, E>;
