use anyhow::Result;
use kavach_core::config::EngineConfig;

pub fn run(config: EngineConfig, port: u16, autostart: bool, seed: Option<u64>) -> Result<()> {
    config.ensure_valid()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("KAVACH-X dashboard → http://localhost:{actual_port}/api/snapshot");

        tokio::select! {
            res = kavach_server::serve_on(config, seed, listener, autostart) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
