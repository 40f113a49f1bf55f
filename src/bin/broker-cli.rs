use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "broker-cli")]
#[command(about = "Send action envelopes to the broker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the broker is up
    Health,
    /// Authenticate a user through the broker
    Auth {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Write a log entry through the broker
    Log {
        #[arg(long)]
        name: String,
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/", url)).send().await?,
        Commands::Auth { email, password } => {
            let envelope = json!({
                "action": "auth",
                "auth": { "email": email, "password": password },
            });
            client.post(format!("{}/handle", url)).json(&envelope).send().await?
        }
        Commands::Log { name, data } => {
            let envelope = json!({
                "action": "logger",
                "logger": { "name": name, "data": data },
            });
            client.post(format!("{}/handle", url)).json(&envelope).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("Status: {}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
