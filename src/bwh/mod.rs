//! BandwagonHost (KiwiVM) API access and traffic reports

pub mod client;
pub mod report;
pub mod types;

pub use client::{collect_traffic, BwhClient, BwhError, TrafficSource, VpsTraffic};
pub use report::{render_traffic_report, ReportStyle};
pub use types::ServiceInfo;
