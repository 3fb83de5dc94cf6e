// Connection handling module
// Serves one accepted TCP connection with hyper on the local task set

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler;
use crate::logger;
use crate::store::PageStore;

/// Serve a connection in its own local task.
///
/// No deadline is applied: a request runs until the store and the client
/// let it finish.
pub fn accept_connection<S>(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState<S>>,
) where
    S: PageStore + ?Sized + 'static,
{
    let state = Arc::clone(state);

    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
