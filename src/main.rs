// src/main.rs

use emr_relauncher::{cli, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();
    // Skipped and ignored events are normal completions and exit 0.
    if let Err(err) = run(args).await {
        eprintln!("emr-relauncher error: {err}");
        std::process::exit(err.exit_code());
    }
}
