//! Command line front end for the Ripple API client

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use serde_json::{json, Value};

use ripple_api::{NodeConfig, Params, Ripple, TransactionType};

/// XRP Ledger client
#[derive(Parser, Debug)]
#[command(name = "ripple-cli", about = "XRP Ledger data API and payment client")]
struct Cli {
    /// Account address used as the payment source and default lookup target
    #[arg(long, env = "ADDRESS")]
    address: String,

    /// Secret sent to the remote signer
    #[arg(long, env = "SECRET_STR", hide_env_values = true)]
    secret: Option<String>,

    /// Override RIPPLE_RPC_URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override RIPPLE_DATA_API_URL
    #[arg(long)]
    data_api_url: Option<String>,

    /// Override RIPPLE_WSS_NODE
    #[arg(long)]
    wss_node: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a payment remotely, then submit it
    Pay {
        #[arg(long)]
        destination: String,
        /// Amount in XRP
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        tag: Option<u32>,
        /// Fee in drops
        #[arg(long)]
        fee: Option<u64>,
    },
    /// Let the configured third-party server sign and submit a payment
    SendForServer {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        tag: Option<u32>,
    },
    ServerInfo,
    Fee,
    /// Account summary from the data API
    Account { address: Option<String> },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut nodes = NodeConfig::from_env();
    if let Some(url) = cli.rpc_url {
        nodes.rpc = url;
    }
    if let Some(url) = cli.data_api_url {
        nodes.data_api = url;
    }
    if let Some(url) = cli.wss_node {
        nodes.wss_node = Some(url);
    }

    let mut ripple = Ripple::new(cli.address, cli.secret.as_deref(), nodes)?;

    let output: Value = match cli.command {
        Command::Pay {
            destination,
            amount,
            tag,
            fee,
        } => {
            info!("paying {amount} XRP to {destination}");
            ripple
                .build_transaction(|tx| {
                    let mut tx = tx
                        .set_amount(amount)
                        .set_destination(destination)
                        .set_transaction_type(TransactionType::Payment);
                    if let Some(tag) = tag {
                        tx = tx.set_destination_tag(tag);
                    }
                    if let Some(fee) = fee {
                        tx = tx.set_fee(fee);
                    }
                    tx
                })?
                .submit()?
        }
        Command::SendForServer {
            destination,
            amount,
            tag,
        } => {
            let mut options = Params::new();
            options.insert("account".into(), json!(ripple.address()));
            options.insert("destination".into(), json!(destination));
            options.insert("amount".into(), json!(amount));
            if let Some(tag) = tag {
                options.insert("destination_tag".into(), json!(tag));
            }
            ripple.send_and_submit_for_server(&options)?
        }
        Command::ServerInfo => ripple.server_info()?,
        Command::Fee => ripple.fee()?,
        Command::Account { address } => serde_json::to_value(ripple.account(address.as_deref())?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
