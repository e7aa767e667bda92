pub use atelier_testing::TestApp;

pub async fn app() -> TestApp {
    TestApp::spawn(
        "catalog",
        atelier_catalog::MIGRATIONS,
        atelier_catalog::router(),
        atelier_catalog::init,
    )
    .await
}
