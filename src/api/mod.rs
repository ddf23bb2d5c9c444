//! Network clients.
//!
//! - [`remote`]: habit storage on a PostgREST API
//! - [`groq`]: suggestion generation through a chat completion API

pub mod groq;
pub mod remote;
