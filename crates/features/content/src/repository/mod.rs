mod block;
mod hero;
mod homepage;
mod popup;

pub use block::BlockRepository;
pub use hero::HeroRepository;
pub use homepage::HomepageRepository;
pub use popup::PopupRepository;

use atelier_database::Query;

/// `isActive = true` when only published documents are wanted.
fn visibility(active_only: bool) -> Query {
    Query::new().filter_opt("isActive", active_only.then_some(true))
}
