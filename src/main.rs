use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let league = match league_bot_lib::start().await {
        Ok(league) => league,
        Err(e) => {
            log::error!("startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Print every division table so the store can be checked from a shell.
    for division in league.config.division_ids() {
        match league.standings.table(division).await {
            Ok(rows) => {
                let rows: Vec<serde_json::Value> = rows.iter().map(|row| row.package()).collect();
                println!("{}", serde_json::json!({ "division": division, "table": rows }));
            },
            Err(e) => {
                log::error!("could not build the table of {division}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    league.db.close().await;
    return ExitCode::SUCCESS;
}
