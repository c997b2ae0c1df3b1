use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wmsigner::{PasswordVariant, Signer, recover_with_fallback};

/**
    WebMoney WMSigner command-line tool.
*/
#[derive(Parser)]
#[command(name = "wmsigner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign one or more messages, printing one signature per line.
    Sign {
        #[command(flatten)]
        key: KeyArgs,

        /// Messages to sign.
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Check a key file and show what was recovered from it.
    Inspect {
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Args)]
struct KeyArgs {
    /// WMID the key file belongs to.
    #[arg(short, long, env = "WMSIGNER_WMID")]
    wmid: String,

    /// Path to the .kwm key file.
    #[arg(short, long)]
    key: PathBuf,

    /// Key file password.
    #[arg(short, long, env = "WMSIGNER_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// The key file is base64-encoded.
    #[arg(long)]
    base64: bool,
}

impl KeyArgs {
    fn read_key(&self) -> Result<Vec<u8>> {
        let data = std::fs::read(&self.key).context("failed to read key file")?;
        if !self.base64 {
            return Ok(data);
        }
        let container = wmsigner::KeyContainer::from_base64(&data)
            .context("failed to decode base64 key file")?;
        Ok(container.to_bytes())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Sign { key, messages } => cmd_sign(&key, &messages),
        Command::Inspect { key } => cmd_inspect(&key),
    }
}

fn cmd_sign(key: &KeyArgs, messages: &[String]) -> Result<()> {
    let data = key.read_key()?;
    let signer =
        Signer::new(&key.wmid, &data, &key.password).context("failed to load signing key")?;

    for message in messages {
        let signature = signer.sign(message).context("failed to sign message")?;
        println!("{signature}");
    }

    Ok(())
}

fn cmd_inspect(key: &KeyArgs) -> Result<()> {
    let data = key.read_key()?;
    let (material, variant) = recover_with_fallback(&data, &key.wmid, &key.password)
        .context("failed to recover signing key")?;

    println!("Key File:        {}", display_path(&key.key));
    println!("WMID:            {}", key.wmid);
    println!("Decrypted With:  {variant}");
    if variant == PasswordVariant::Half {
        eprintln!("Note: this key was encrypted with the first half of the password");
    }

    println!();
    println!("Stored Lengths:");
    println!("  Exponent:      {}", material.exponent_len);
    println!("  Modulus:       {}", material.modulus_len);

    let signer = Signer::from_components(material.exponent(), material.modulus())
        .context("recovered key is unusable")?;
    println!();
    println!("Recovered:");
    println!("  Exponent:      {} bits", signer.exponent().bits());
    println!("  Modulus:       {} bits", signer.modulus().bits());

    Ok(())
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
