//! Client for the external notes service
//!
//! Notes are owned by a separate service. This crate submits new notes to it
//! with a form-encoded `POST /new` and reads a user's notes back from
//! `GET /notes?userid=<id>`, whose body is decoded lazily record by record.

mod client;
mod decoder;
mod error;
mod memory;

pub use client::*;
pub use decoder::*;
pub use error::*;
pub use memory::*;
