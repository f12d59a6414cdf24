pub(crate) mod operation;
pub(crate) mod value;
