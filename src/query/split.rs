//! Training/test/benchmark partition of the claims.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the three fixed partitions of the claims, by id order.
///
/// Training covers the first 70%, test the next 20%, benchmark the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Training,
    Test,
    Benchmark,
}

impl Split {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Test => "test",
            Self::Benchmark => "benchmark",
        }
    }

    /// Half-open index range `[start, end)` of this split among `total`
    /// claims.
    ///
    /// The cut points are `total * 0.7` and `total * 0.9` computed in
    /// floating point and truncated: 90 claims give 62 training claims.
    #[must_use]
    pub fn bounds(self, total: i64) -> (i64, i64) {
        let total = total.max(0);
        let training_end = cut(total, 0.7);
        let test_end = cut(total, 0.9);
        match self {
            Self::Training => (0, training_end),
            Self::Test => (training_end, test_end),
            Self::Benchmark => (test_end, total),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn cut(total: i64, fraction: f64) -> i64 {
    (total as f64 * fraction) as i64
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" => Ok(Self::Training),
            "test" => Ok(Self::Test),
            "benchmark" => Ok(Self::Benchmark),
            other => Err(Error::InvalidArgument(format!(
                "invalid split '{other}': must be 'training', 'test', or 'benchmark'"
            ))),
        }
    }
}
