use super::errors::ServerError;
use super::handler::RoundRobinHandler;
use super::listener::{bind_udp_socket, serve_udp};
use super::resolver::{QueryResolver, DEFAULT_ANSWER_TTL};
use crate::system::discover_bind_addresses;
use rrdns_application::ports::{QueryObserver, RecordStore};
use rrdns_domain::config::DEFAULT_DNS_PORT;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Brings up one UDP listener per local address for a zone.
pub struct ListenerManager {
    store: Arc<dyn RecordStore>,
    observer: Arc<dyn QueryObserver>,
    ttl: u32,
    shutdown: CancellationToken,
}

impl ListenerManager {
    pub fn new(store: Arc<dyn RecordStore>, observer: Arc<dyn QueryObserver>) -> Self {
        Self {
            store,
            observer,
            ttl: DEFAULT_ANSWER_TTL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Bind every address of `interface` (or the IPv4 wildcard) on `port`
    /// and answer for `suffix`. Port 0 means 53.
    ///
    /// Every socket is bound before any listener starts, so an error here
    /// means nothing is serving. Must be called inside a tokio runtime.
    pub fn start(
        &self,
        interface: Option<&str>,
        port: u16,
        suffix: &str,
    ) -> Result<ListenerSet, ServerError> {
        let port = if port == 0 { DEFAULT_DNS_PORT } else { port };
        let addrs: Vec<SocketAddr> = discover_bind_addresses(interface)?
            .into_iter()
            .map(|ip: IpAddr| SocketAddr::new(ip, port))
            .collect();

        self.start_on(&addrs, suffix)
    }

    /// Like [`start`](Self::start) with explicit socket addresses. Port 0
    /// here is handed to the OS as-is.
    pub fn start_on(&self, addrs: &[SocketAddr], suffix: &str) -> Result<ListenerSet, ServerError> {
        let resolver =
            QueryResolver::new(self.store.clone(), self.observer.clone()).with_ttl(self.ttl);
        let handler = Arc::new(RoundRobinHandler::new(suffix, resolver)?);

        let mut sockets = Vec::with_capacity(addrs.len());
        for addr in addrs {
            let socket = bind_udp_socket(*addr)?;
            let local_addr = socket
                .local_addr()
                .map_err(|source| ServerError::Bind { addr: *addr, source })?;
            sockets.push((local_addr, Arc::new(socket)));
        }

        let mut tasks = JoinSet::new();
        let mut local_addrs = Vec::with_capacity(sockets.len());
        for (local_addr, socket) in sockets {
            let transport = if local_addr.is_ipv4() { "udp" } else { "udp6" };
            info!(
                zone = %handler.zone(),
                bind_address = %local_addr,
                transport,
                "Starting DNS server"
            );

            let handler = handler.clone();
            let shutdown = self.shutdown.clone();
            tasks.spawn(async move {
                let result = serve_udp(socket, local_addr, handler, shutdown).await;
                (local_addr, result)
            });
            local_addrs.push(local_addr);
        }

        Ok(ListenerSet {
            tasks,
            local_addrs,
            shutdown: self.shutdown.clone(),
        })
    }
}

/// Running listeners started by one [`ListenerManager::start`] call.
pub struct ListenerSet {
    tasks: JoinSet<(SocketAddr, Result<(), ServerError>)>,
    local_addrs: Vec<SocketAddr>,
    shutdown: CancellationToken,
}

impl ListenerSet {
    /// Addresses actually bound, with OS-assigned ports filled in.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    pub fn len(&self) -> usize {
        self.local_addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_addrs.is_empty()
    }

    /// Resolves when every listener has stopped, or with the first listener
    /// failure.
    pub async fn wait(&mut self) -> Result<(), ServerError> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((addr, Err(e))) => {
                    error!(bind_address = %addr, error = %e, "DNS listener failed");
                    return Err(e);
                }
                Err(e) => return Err(ServerError::Join(e.to_string())),
            }
        }
        Ok(())
    }

    /// Stop every listener and wait for them to exit.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        self.shutdown.cancel();

        let mut first_error = None;
        while let Some(joined) = self.tasks.join_next().await {
            let result = match joined {
                Ok((_, result)) => result,
                Err(e) => Err(ServerError::Join(e.to_string())),
            };
            if let Err(e) = result {
                error!(error = %e, "DNS listener failed during shutdown");
                first_error.get_or_insert(e);
            }
        }

        info!(listeners = self.local_addrs.len(), "DNS listeners stopped");
        first_error.map_or(Ok(()), Err)
    }
}
