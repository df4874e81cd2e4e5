pub(crate) mod direction;
pub(crate) mod partition;
