pub(crate) mod driver;
pub(crate) mod state;
pub(crate) mod ticker;
pub(crate) mod view;
