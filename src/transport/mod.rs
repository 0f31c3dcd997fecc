//! HTTP transport binding: one endpoint, one server role, one client role

pub mod client;
pub mod response;
pub mod server;

pub use client::A2aClient;
pub use response::{ClientResponse, ResponsePart};
pub use server::{create_router, dispatch, run_server, A2aServer};
