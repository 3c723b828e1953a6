// Skill extraction contract shared by the server, the HTTP client and the results view.

pub mod data_uri;
pub mod error;
pub mod models;
pub mod service;
