pub(crate) mod background;
pub(crate) mod config;
pub(crate) mod simulator;
