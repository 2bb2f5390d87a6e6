pub(crate) mod record;
pub(crate) mod stats;
pub(crate) mod time_key;
