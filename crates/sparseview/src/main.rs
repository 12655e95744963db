use clap::Parser;

/// Native viewer for sparse structure-from-motion reconstructions.
#[derive(Parser)]
#[command(name = "sparseview", version, about)]
struct Args {
    /// Base URL of the workspace API backend.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,
}

fn main() -> sparseview::Result<()> {
    env_logger::init();

    let args = Args::parse();

    sparseview::init()?;

    match sparseview::ApiClient::new(&args.url) {
        Ok(client) => sparseview::show_with_client(client),
        Err(err) => {
            log::error!("invalid backend URL '{}': {err}", args.url);
            std::process::exit(1);
        }
    }

    Ok(())
}
