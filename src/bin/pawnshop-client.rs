use clap::Parser;
use pawnshop::client::PawnShopClient;
use pawnshop::protocol::{Offer, RequestKind};

#[derive(Parser)]
#[command(name = "pawnshop-client")]
#[command(about = "Send a single offer to a pawn shop server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Value handed to the shop
    #[arg(short, long, allow_negative_numbers = true)]
    offer: i64,

    /// Minimum value wanted back
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    demand: i64,

    /// Request kind tag
    #[arg(short, long, default_value = "PAWN")]
    code: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PawnShopClient::new(cli.addr);

    let offer = Offer {
        kind: RequestKind::from(cli.code),
        offer: cli.offer,
        demand: cli.demand,
    };

    let answer = client.send_offer(&offer).await?;
    println!("{}", serde_json::to_string(&answer)?);
    Ok(())
}
