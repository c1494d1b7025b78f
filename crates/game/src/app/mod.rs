pub(crate) mod bootstrap;
pub(crate) mod config;
pub(crate) mod gameplay;
