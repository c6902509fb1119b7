use anyhow::{bail, Result};
use clap::Parser;
use tracing::error;

use rust_sss_recon::cli::{Cli, Commands};
use rust_sss_recon::commands::{evaluate_file, recover_files, RecoverOptions};
use rust_sss_recon::{decode, fingerprint, secret_to_text};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recover {
            files,
            policy,
            threshold_only,
            text,
            fingerprint: print_fingerprint,
        } => {
            let options = RecoverOptions {
                policy: policy.into(),
                threshold_only,
            };

            let results = recover_files(&files, &options);
            let mut failed = 0;

            for (path, result) in files.iter().zip(results) {
                match result {
                    Ok(recovery) => {
                        if print_fingerprint {
                            println!(
                                "{}: sha256:{}",
                                path.display(),
                                fingerprint(&recovery.secret)
                            );
                        } else {
                            println!("{}: {}", path.display(), recovery.secret);
                        }

                        if text {
                            if let Some(message) = secret_to_text(&recovery.secret) {
                                println!("{}: text: {}", path.display(), message);
                            }
                        }
                    }
                    Err(e) => {
                        error!("{e:#}");
                        failed += 1;
                    }
                }
            }

            if failed > 0 {
                bail!("{} of {} documents failed", failed, files.len());
            }
        }
        Commands::Decode { digits, base } => {
            println!("{}", decode(&digits, base)?);
        }
        Commands::Evaluate {
            file,
            at,
            policy,
            threshold_only,
        } => {
            let options = RecoverOptions {
                policy: policy.into(),
                threshold_only,
            };

            println!("{}", evaluate_file(&file, &at, &options)?);
        }
    }

    Ok(())
}
