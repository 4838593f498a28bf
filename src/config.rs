use core::time::Duration;

/// Playable board edge length (the grid adds a one-cell wall border).
pub const BOARD_SIZE: usize = 8;

/// Liveness ping period.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Target period between rendered frames (~60 Hz).
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Timeout for establishing the connection and for each frame write.
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest accepted wire frame, in bytes.
pub const MAX_FRAME_SIZE: u32 = 1 << 20;

pub const SURFACE_WIDTH: usize = 640;
pub const SURFACE_HEIGHT: usize = 480;

/// Edge length of one board cell, in pixels.
pub const TILE_SIZE: f32 = 40.0;

pub const DEFAULT_SERVER: &str = "127.0.0.1:3001";

/// Tunables for a client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub heartbeat_interval: Duration,
    pub frame_period: Duration,
    pub io_timeout: Duration,
    pub max_frame_size: u32,
}

impl ClientConfig {
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    #[must_use]
    pub fn with_frame_period(mut self, period: Duration) -> Self {
        self.frame_period = period;
        self
    }

    #[must_use]
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Values of zero are clamped to one byte.
    #[must_use]
    pub fn with_max_frame_size(mut self, max: u32) -> Self {
        self.max_frame_size = max.max(1);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: HEARTBEAT_INTERVAL,
            frame_period: FRAME_PERIOD,
            io_timeout: IO_TIMEOUT,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}
