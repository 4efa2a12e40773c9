use anyhow::Context;
use api::{completion::OpenAi, Service};
use core::{convert::Infallible, time::Duration};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime, task::JoinSet};

const DEFAULT_PORT: u16 = 5000;
const GRACE_PERIOD: Duration = Duration::from_secs(10);

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Parse environment variables
    let port = match env::var("PORT") {
        Ok(port) => port.parse().context("PORT is not a valid port number")?,
        _ => DEFAULT_PORT,
    };
    let key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| OpenAi::DEFAULT_MODEL.into());
    let endpoint = match env::var("OPENAI_API_URL") {
        Ok(url) => url.parse().context("OPENAI_API_URL is not a valid URI")?,
        _ => OpenAi::DEFAULT_ENDPOINT.parse()?,
    };

    let openai = OpenAi::new(&key, model.into_boxed_str(), endpoint).context("OPENAI_API_KEY is not a valid header value")?;
    let service = Arc::new(Service::new(openai));

    let runtime = Runtime::new()?;
    runtime.block_on(async move {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let tcp = TcpListener::bind(addr).await?;
        log::info!("Quiz server listening on {addr}");

        let mut stop = core::pin::pin!(tokio::signal::ctrl_c());
        let mut set = JoinSet::new();
        loop {
            let stream = tokio::select! {
                biased;
                res = &mut stop => {
                    res?;
                    break;
                }
                Some(res) = set.join_next(), if !set.is_empty() => {
                    if let Err(err) = res {
                        log::error!("Connection task panicked: {err}");
                    }
                    continue;
                }
                res = tcp.accept() => match res {
                    Ok((stream, peer)) => {
                        log::debug!("Accepted connection from {peer}");
                        stream
                    }
                    Err(err) => {
                        log::error!("Failed to accept connection: {err}");
                        continue;
                    }
                },
            };

            let outer = service.clone();
            let handler = service_fn(move |req| {
                let inner = outer.clone();
                async move { Ok::<_, Infallible>(inner.on_request(req).await) }
            });
            set.spawn(async move {
                if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), handler).await {
                    log::error!("Connection closed with error: {err}");
                }
            });
        }

        log::info!("Shutting down with {} connection(s) in flight", set.len());
        drop(tcp);
        if tokio::time::timeout(GRACE_PERIOD, async { while set.join_next().await.is_some() {} }).await.is_err() {
            log::warn!("Grace period elapsed, aborting remaining connections");
            set.abort_all();
        }

        anyhow::Ok(())
    })
}
