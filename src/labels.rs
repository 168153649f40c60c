pub(crate) mod annotate;
pub(crate) mod io;
pub(crate) mod record;
