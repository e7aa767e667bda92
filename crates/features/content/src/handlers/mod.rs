pub(crate) mod block;
pub(crate) mod hero;
pub(crate) mod homepage;
pub(crate) mod popup;
