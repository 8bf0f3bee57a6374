pub(crate) mod escape;
pub(crate) mod layout;
pub(crate) mod outline;
