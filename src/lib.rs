pub use indigits_config as config;

pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::site::DirectOutput;
pub use crate::site::FeedOutput;
pub use crate::site::SiteContext;

pub mod error;

mod site;
