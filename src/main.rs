use pizza_cli::core::output;
use pizza_cli::utils::logger;
use pizza_cli::{ApiConfig, CommandError, DominosClient, Invocation};
use std::io::Write;

fn build_client() -> Result<DominosClient, CommandError> {
    let config = ApiConfig::load()?;
    tracing::debug!("API config: {:?}", config);
    DominosClient::new(config).map_err(|e| CommandError::config(e.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    // 每次執行只跑一個指令，結果一律輸出成一行 JSON
    let line = match Invocation::from_argv(&argv) {
        Ok(invocation) => {
            logger::init_cli_logger(invocation.args.flag("verbose"));
            tracing::info!("Running '{}'", invocation.command);

            match build_client() {
                Ok(client) => invocation.execute(&client).await,
                Err(e) => output::failure(&e),
            }
        }
        Err(e) => output::failure(&e),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}
