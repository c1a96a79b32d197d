#[tokio::main]
async fn main() {
    smartbooking::run().await;
}
