pub(crate) mod ease;
pub(crate) mod progress;
pub(crate) mod state;
