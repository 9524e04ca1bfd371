pub(crate) mod auth;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod guidance;
pub(crate) mod handlers;
pub(crate) mod materials;
pub(crate) mod pagination;
pub(crate) mod performance;
pub(crate) mod questions;
pub(crate) mod router;
pub(crate) mod validation;
