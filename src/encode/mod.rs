pub(crate) mod writer;
