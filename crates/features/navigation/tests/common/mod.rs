pub use atelier_testing::TestApp;

pub async fn app() -> TestApp {
    TestApp::spawn(
        "navigation",
        atelier_navigation::MIGRATIONS,
        atelier_navigation::router(),
        atelier_navigation::init,
    )
    .await
}
