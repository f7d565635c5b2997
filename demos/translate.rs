//! Translation gateway example
//!
//! Translates the words given on the command line.
//!
//! Run with:
//!
//! ```text
//! TRANSLATOR_CLIENT_ID=... TRANSLATOR_CLIENT_SECRET=... \
//!     cargo run --example translate -- [--from it] [--to en] mal di testa
//! ```

use clap::Parser;
use conneg_axum_http::{Gateway, TranslatorConfig};

#[derive(Parser)]
#[command(name = "translate")]
#[command(about = "Translate text from one language to another", long_about = None)]
struct Cli {
    /// Term to translate
    #[arg(value_name = "TERM", required = true)]
    term: Vec<String>,

    /// From language
    #[arg(short, long = "from", alias = "frm", default_value = "it")]
    from: String,

    /// To language
    #[arg(short, long, default_value = "en")]
    to: String,

    /// OAuth client id
    #[arg(long, env = "TRANSLATOR_CLIENT_ID", default_value = "")]
    client_id: String,

    /// OAuth client secret
    #[arg(long, env = "TRANSLATOR_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    client_secret: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let gateway = Gateway::new(
        TranslatorConfig::default().with_credentials(cli.client_id, cli.client_secret),
    );
    let translated = gateway
        .translate(&cli.term.join(" "), &cli.from, &cli.to, false)
        .await?;
    println!("{}", translated);
    Ok(())
}
