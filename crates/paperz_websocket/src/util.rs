//! internal websocket utility types and code

use std::io::{Error, ErrorKind, Result};
use std::net::SocketAddr;

use url2::Url2;

/// The only scheme these sockets speak.
pub(crate) const SCHEME: &str = "ws";

/// internal helper convert urls to socket addrs for connection
pub(crate) async fn url_to_addr(url: &Url2) -> Result<SocketAddr> {
    let (host, port) = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) if url.scheme() == SCHEME => (host, port),
        _ => {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("got: '{}', expected: '{}://host:port'", url, SCHEME),
            ))
        }
    };

    let rendered = format!("{}:{}", host, port);

    if let Ok(iter) = tokio::net::lookup_host(rendered.clone()).await {
        let mut fallback = None;
        for addr in iter {
            if addr.is_ipv4() {
                return Ok(addr);
            }
            fallback.get_or_insert(addr);
        }
        if let Some(addr) = fallback {
            return Ok(addr);
        }
    }

    Err(Error::new(
        ErrorKind::InvalidInput,
        format!("could not parse '{}', as 'host:port'", rendered),
    ))
}
