pub use atelier_testing::TestApp;

pub async fn app() -> TestApp {
    TestApp::spawn(
        "inquiries",
        atelier_inquiries::MIGRATIONS,
        atelier_inquiries::router(),
        atelier_inquiries::init,
    )
    .await
}
