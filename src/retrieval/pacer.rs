use log::debug;
use std::future::Future;
use std::time::Duration;

/// Spacing between consecutive data API requests.
pub const REQUEST_SPACING: Duration = Duration::from_secs(3);

/// Waits between chunk requests so the data API is not flooded.
pub trait Pacer {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Sleeps for [`REQUEST_SPACING`] after every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay;

impl Pacer for FixedDelay {
    async fn pause(&self) {
        debug!("Pausing {:?} before the next request", REQUEST_SPACING);
        tokio::time::sleep(REQUEST_SPACING).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_waits_three_seconds() {
        let started = Instant::now();
        FixedDelay.pause().await;
        let waited = started.elapsed();
        assert!(waited >= REQUEST_SPACING);
        assert!(waited < REQUEST_SPACING + Duration::from_millis(10));
    }
}
