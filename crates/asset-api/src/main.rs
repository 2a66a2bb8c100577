#[tokio::main]
async fn main() {
    asset_api::start(std::env::args()).await;
}
