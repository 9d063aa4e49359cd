use anyhow::Result;
use clap::{Parser, Subcommand};
mod auth;
use saltbox::{Config, Digest, OpaqueSalt, Saltbox};
use std::time::Duration;

#[derive(Debug, clap::Args)]
struct HasherArgs {
    /// PBKDF2 iteration count (default: 100000)
    #[arg(long, global = true, env = "SALTBOX_ITERATIONS")]
    iterations: Option<u32>,

    /// Digest algorithm: sha1, sha256 or sha512 (default: sha256)
    #[arg(long, global = true)]
    digest: Option<Digest>,

    /// Salt size in bytes (default: 32)
    #[arg(long = "salt-size", global = true)]
    salt_size: Option<usize>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "key-length", global = true)]
    key_length: Option<usize>,

    /// Reject secrets longer than this many bytes
    #[arg(long = "max-secret-length", global = true)]
    max_secret_length: Option<usize>,
}

impl HasherArgs {
    fn to_config(&self) -> Result<Config> {
        let default = Config::default();

        Ok(Config::new(
            self.iterations.unwrap_or(default.default_iterations()),
            self.digest.unwrap_or(default.digest()),
            self.salt_size.unwrap_or(default.salt_size()),
            self.key_length.unwrap_or(default.key_length()),
            self.max_secret_length.or(default.max_secret_length()),
        )?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "saltbox")]
#[command(
    version,
    about = "Self-describing PBKDF2 password hashing with latency calibration."
)]
struct Cli {
    #[command(flatten)]
    config: HasherArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generates a fresh opaque salt
    Salt {
        /// Explicit iteration count, must not be below the configured default
        explicit_iterations: Option<u32>,
    },

    /// Hashes a secret, printing the derived hash and its salt
    Hash {
        /// Reuse an existing salt instead of generating one
        #[arg(long)]
        salt: Option<OpaqueSalt>,
    },

    /// Checks a secret against a stored hash and its salt
    #[command(arg_required_else_help = true)]
    Verify { salt: OpaqueSalt, hash: String },

    /// Finds an iteration count hitting a target hashing duration
    Calibrate {
        /// Target duration in milliseconds
        #[arg(long = "target-ms")]
        target_ms: u64,

        /// Accepted deviation as a fraction of the target
        #[arg(long, default_value_t = 0.2)]
        tolerance: f64,
    },

    /// Prints the fingerprint hash of a JSON value
    Fingerprint { value: Option<String> },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let hasher = Saltbox::new(args.config.to_config()?)?;

    match args.command {
        Commands::Salt {
            explicit_iterations,
        } => {
            let salt = hasher.generate_salt(explicit_iterations)?;
            println!("{salt}");
        }
        Commands::Hash { salt } => {
            let secret = auth::read_secret()?;
            let (hash, salt) = match salt {
                Some(salt) => (hasher.hash_with_salt(&secret, &salt)?, salt),
                None => hasher.hash(&secret)?,
            };
            println!("{hash}");
            println!("{salt}");
        }
        Commands::Verify { salt, hash } => {
            let secret = auth::read_secret()?;
            if hasher.verify(&salt, &hash, &secret)? {
                println!("verified");
            } else {
                println!("not verified");
                std::process::exit(1);
            }
        }
        Commands::Calibrate {
            target_ms,
            tolerance,
        } => {
            let iterations = hasher.find_optimal_iterations(
                Duration::from_millis(target_ms),
                tolerance,
                None,
            )?;
            println!("{iterations}");
        }
        Commands::Fingerprint { value } => {
            let parsed = value.map(|v| {
                serde_json::from_str::<serde_json::Value>(&v)
                    .unwrap_or(serde_json::Value::String(v))
            });
            println!("{}", hasher.weak_hash(parsed.as_ref())?);
        }
    }

    Ok(())
}
