use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Allowed auto-refresh periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefreshInterval {
    #[default]
    OneSecond,
    ThreeSeconds,
    FiveSeconds,
}

impl RefreshInterval {
    pub const ALL: [RefreshInterval; 3] = [
        RefreshInterval::OneSecond,
        RefreshInterval::ThreeSeconds,
        RefreshInterval::FiveSeconds,
    ];

    pub fn as_millis(self) -> u64 {
        match self {
            RefreshInterval::OneSecond => 1000,
            RefreshInterval::ThreeSeconds => 3000,
            RefreshInterval::FiveSeconds => 5000,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    pub fn from_millis(millis: u64) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_millis() == millis)
            .ok_or_else(|| {
                format!(
                    "Invalid refresh interval: {}ms. Allowed values are 1000, 3000 and 5000",
                    millis
                )
            })
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {}s", self.as_millis() / 1000)
    }
}

impl FromStr for RefreshInterval {
    type Err = String;

    /// Accepts milliseconds ("3000") or seconds with a unit ("3s")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let millis = if let Some(millis) = trimmed.strip_suffix("ms") {
            millis.parse::<u64>().ok()
        } else if let Some(seconds) = trimmed.strip_suffix('s') {
            seconds
                .parse::<u64>()
                .ok()
                .and_then(|secs| secs.checked_mul(1000))
        } else {
            trimmed.parse::<u64>().ok()
        };

        match millis {
            Some(millis) => Self::from_millis(millis),
            None => Err(format!(
                "Invalid refresh interval: {}. Use 1000, 3000, 5000 (ms) or 1s, 3s, 5s",
                s
            )),
        }
    }
}
