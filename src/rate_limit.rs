use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::thread;

/// Client-side request pacing shared by every fetch worker.
///
/// The API answers 429 when the key's quota is exceeded; pacing keeps the
/// workers under the per-second limit so that happens rarely.
pub struct RequestPacer {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl RequestPacer {
    pub fn per_second(requests: u32) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(requests.max(1)).unwrap_or(NonZeroU32::MIN));
        RequestPacer {
            limiter: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks the calling thread until the quota allows one more request.
    pub fn wait(&self) {
        while let Err(not_until) = self.limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }
}
