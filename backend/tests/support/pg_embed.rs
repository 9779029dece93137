//! Access to the shared embedded PostgreSQL cluster.
//!
//! The cluster is started once per test binary and reused by every test in
//! it. Bootstrapping is retried because the first start downloads binaries
//! and can fail transiently.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Returns the shared cluster handle, starting the cluster on first use.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut last_error = String::new();
    for attempt in 0..SHARED_CLUSTER_RETRIES {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = format!("{err:?}");
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}
