pub(crate) mod performances;
pub(crate) mod questions;
pub(crate) mod study_materials;
pub(crate) mod tests;
pub(crate) mod users;
