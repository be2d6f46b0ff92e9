use anyhow::Result;
use fee_optimizer::client::FeeClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let base_url = std::env::var("FEE_OPTIMIZER_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    println!("Fee Optimizer Probe");
    println!("===================");
    println!("Server: {}", base_url);
    println!();

    let client = FeeClient::new(base_url);
    let fees = client.optimized_fees().await?;

    println!("{:<12} {:>8} {:>14} {:>12}", "Chain", "Id", "Gas (gwei)", "Cost (USD)");
    for cost in &fees.all_chain_costs {
        println!(
            "{:<12} {:>8} {:>14.4} {:>12.6}{}",
            cost.chain_name,
            cost.chain_id,
            cost.gas_price,
            cost.gas_price_usd,
            if cost.recommended { "  <- cheapest" } else { "" }
        );
    }

    println!();
    println!(
        "Recommended: {} (saves {:.2}%, ${:.6})",
        fees.recommended_chain_name, fees.estimated_savings, fees.estimated_savings_usd
    );
    println!("Last updated: {}", fees.last_updated.to_rfc3339());

    Ok(())
}
