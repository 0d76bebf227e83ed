pub(crate) mod center;
pub(crate) mod rotation;
