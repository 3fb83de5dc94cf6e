// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;
use crate::store::PageStore;

/// Accept connections and hand each one to its own local task.
///
/// Must run inside a `LocalSet`. Returns once `shutdown` is notified; accept
/// errors are logged and the loop continues.
pub async fn start_server_loop<S>(
    listener: TcpListener,
    state: Arc<AppState<S>>,
    shutdown: Arc<Notify>,
) where
    S: PageStore + ?Sized + 'static,
{
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RawSettings};
    use crate::server::create_reusable_listener;
    use crate::store::MockPageStore;
    use hyper::body::Bytes;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::task::LocalSet;

    async fn roundtrip(addr: std::net::SocketAddr, raw_request: &str) -> String {
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(raw_request.as_bytes()).await.unwrap();
        let mut raw_response = Vec::new();
        client.read_to_end(&mut raw_response).await.unwrap();
        String::from_utf8(raw_response).unwrap()
    }

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let mut store = MockPageStore::new();
        store.expect_is_open().return_const(true);
        store.expect_is_ready().return_const(true);
        store
            .expect_exists()
            .withf(|key| key == "/foo")
            .returning(|_| Ok(1));
        store
            .expect_get()
            .withf(|key| key == "/foo")
            .returning(|_| Ok(Some(Bytes::from_static(b"bar"))));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(
            Config::from_raw(&RawSettings::default()),
            Arc::new(store),
        ));
        let shutdown = Arc::new(Notify::new());

        LocalSet::new()
            .run_until(async move {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    state,
                    Arc::clone(&shutdown),
                ));

                let found = roundtrip(
                    addr,
                    "GET /foo HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(found.starts_with("HTTP/1.1 200 OK\r\n"), "{found}");
                assert!(found.ends_with("\r\n\r\nbar"), "{found}");

                let unroutable = roundtrip(
                    addr,
                    "OPTIONS /foo HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(unroutable.starts_with("HTTP/1.1 404 Not Found\r\n"), "{unroutable}");
                assert!(unroutable.ends_with("\r\n\r\nNot Found"), "{unroutable}");

                shutdown.notify_one();
                server.await.unwrap();
            })
            .await;
    }
}
