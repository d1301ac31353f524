//! Core entity definitions for the user directory.
//!
//! This crate defines the data types shared between the user store, the notes
//! client and the directory server: users as kept by the directory, and notes
//! as returned by the external notes service.

mod note;
mod user;

pub use note::*;
pub use user::*;
