pub(crate) mod actor;
pub(crate) mod motion;
pub(crate) mod template;
