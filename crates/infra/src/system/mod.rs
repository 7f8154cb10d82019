use chrono::Utc;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System whose time starts at `origin_millis` and then follows the tokio
/// clock. With a paused tokio clock both "now" and the reminder timers
/// move together when time is advanced.
pub struct MockSys {
    origin_millis: i64,
    started: tokio::time::Instant,
}

impl MockSys {
    pub fn new(origin_millis: i64) -> Self {
        Self {
            origin_millis,
            started: tokio::time::Instant::now(),
        }
    }
}

impl ISys for MockSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.origin_millis + self.started.elapsed().as_millis() as i64
    }
}
