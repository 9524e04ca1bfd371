#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = edusphere_rust::run().await {
        eprintln!("edusphere-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
