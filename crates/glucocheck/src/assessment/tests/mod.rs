pub(crate) mod common;

mod advisory;
