pub use atelier_testing::TestApp;

pub async fn app() -> TestApp {
    TestApp::spawn(
        "contact",
        atelier_contact::MIGRATIONS,
        atelier_contact::router(),
        atelier_contact::init,
    )
    .await
}
