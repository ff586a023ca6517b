/// Recognizer endpoint derived from the configured peer: `ws://<host>/ws`,
/// or `wss://<host>/ws` when the peer is secure (mirroring the security
/// scheme of the serving origin).
pub fn endpoint_url(host: &str, secure: bool) -> String {
    let scheme = if secure { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_host_uses_ws_scheme() {
        assert_eq!(endpoint_url("127.0.0.1:8000", false), "ws://127.0.0.1:8000/ws");
    }

    #[test]
    fn secure_host_uses_wss_scheme() {
        assert_eq!(
            endpoint_url("recognizer.local", true),
            "wss://recognizer.local/ws"
        );
    }

    #[test]
    fn host_with_port_is_preserved() {
        assert_eq!(endpoint_url("10.0.0.5:9001", true), "wss://10.0.0.5:9001/ws");
    }
}
