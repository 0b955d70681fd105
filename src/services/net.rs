use std::time::Duration;

/// How often the watcher re-checks the worker.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Checks whether the worker endpoint is reachable. Any HTTP answer,
/// whatever its status, counts as reachable; only a transport-level
/// failure (DNS, refused connection, timeout) means offline.
pub fn probe(url: &str) -> bool {
    let Ok(client) = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(PROBE_TIMEOUT)
        .build()
    else {
        return false;
    };
    client.get(url).send().is_ok()
}
