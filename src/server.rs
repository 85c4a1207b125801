//! HTTP layer.
//!
//! A request flows through [`service`] (body collection and common headers),
//! [`router`] (method and path to [`router::Route`]), [`request`] (decoding and
//! validation) and [`dispatch`] (one [`crate::facade::Facade`] call), and is
//! encoded by [`response`].

pub mod dispatch;
pub mod request;
pub mod response;
pub mod router;
pub mod service;

pub use dispatch::handle_route;
pub use router::{Route, resolve_route};
pub use service::FacadeService;
