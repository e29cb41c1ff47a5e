use anyhow::Result;
use naible_server::bootstrap;

pub async fn run(bind: Option<String>) -> Result<()> {
    let (config, state) = bootstrap::bootstrap()?;
    let bind = bind.unwrap_or(config.server.bind);
    naible_server::serve(state, &bind).await
}
