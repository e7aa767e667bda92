use atelier_derive::atelier_error;
use std::borrow::Cow;

#[atelier_error]
pub enum DemoError {
    #[status(404)]
    #[error("Missing{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_config() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk gone")).context("Reading config")
}

#[test]
fn status_attribute_maps_variants() {
    let missing = DemoError::NotFound { message: "hero".into(), context: None };
    assert_eq!(missing.status_code(), 404);

    let internal = DemoError::from("boom");
    assert_eq!(internal.status_code(), 500);
}

#[test]
fn context_is_rendered_in_display() {
    let err = read_config().unwrap_err();
    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (Reading config): disk gone");
}

#[test]
fn context_can_be_attached_to_own_errors() {
    let result: Result<(), DemoError> =
        Err(DemoError::NotFound { message: "menu".into(), context: None });
    let err = result.context("footer").unwrap_err();
    assert_eq!(err.to_string(), "Missing (footer): menu");
}

#[test]
fn strings_convert_into_internal() {
    let err: DemoError = String::from("unexpected").into();
    assert!(matches!(err, DemoError::Internal { .. }));
}
