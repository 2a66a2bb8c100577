#[tokio::main]
async fn main() {
    deploy_contracts::start(std::env::args()).await;
}
