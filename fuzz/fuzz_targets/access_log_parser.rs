#![no_main]

use hourglass::dashboard::{Dashboard, DashboardParams};
use hourglass::source::read_csv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary CSV must either fail cleanly or render without panicking
    if let Ok(rows) = read_csv(data) {
        if let Ok(dashboard) = Dashboard::from_rows(rows) {
            let report = dashboard.render(&DashboardParams::default());
            assert_eq!(report.total_records, dashboard.len());
        }
    }
});
