pub mod artist;
pub mod artwork;
pub mod budget;
pub mod chat;
pub mod client;
pub mod collection;
pub mod dashboard;
pub mod follow_up;
pub mod partner;
pub mod sale;

pub use collection::{Collection, Document};
