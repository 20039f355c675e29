//! Backend commands queued from the controllers to the backend worker.

use std::fmt;

use shared::protocol::CalculateChartRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing request ids for one controller.
#[derive(Debug, Default)]
pub struct RequestCounter {
    next: u64,
}

impl RequestCounter {
    pub fn issue(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCharts {
        request: RequestId,
    },
    CalculateChart {
        request: RequestId,
        input: CalculateChartRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchCharts { .. } => "fetch_charts",
            Self::CalculateChart { .. } => "calculate_chart",
        }
    }

    pub fn request(&self) -> RequestId {
        match self {
            Self::FetchCharts { request } | Self::CalculateChart { request, .. } => *request,
        }
    }
}
