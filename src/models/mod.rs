mod client;
mod contact;
mod phone;

pub use client::{Client, ClientFilter, ClientPatch};
pub use contact::ClientContact;
pub use phone::Phone;
