#![allow(dead_code)]

mod mock_ports;

pub use mock_ports::*;

use std::time::Duration;

/// Polls `condition` until it holds, failing the test after about two seconds.
pub async fn wait_until<F>(condition: F)
where
    F: Fn() -> bool,
{
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}
