pub use atelier_testing::TestApp;

pub async fn app() -> TestApp {
    TestApp::spawn(
        "content",
        atelier_content::MIGRATIONS,
        atelier_content::router(),
        atelier_content::init,
    )
    .await
}
