#[actix_web::main]
async fn main() -> std::io::Result<()> {
    permit_transit_server::run().await
}
