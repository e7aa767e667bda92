mod block;
mod hero;
mod homepage;
mod popup;

pub use block::{ContentBlock, ContentBlockInput};
pub use hero::{HeroSection, HeroSectionInput};
pub use homepage::{ContentElement, ContentElementInput, ElementKind, HomepageContent, HomepageContentInput};
pub use popup::{SignupPopup, SignupPopupInput};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TEXT_CHARS: usize = 500;
pub const MAX_BODY_CHARS: usize = 50_000;
