use crate::filter::Filter;
use crate::measure::LatencyMeasurer;
use spdlog::info;

/// A filter that measures the latency of an inner filter.
pub struct Latency<F> {
    name: String,
    report_interval: usize,
    filter: F,
    measurer: LatencyMeasurer,
    count: usize,
}

impl<F: Filter> Latency<F> {
    pub fn new(
        name: impl Into<String>,
        report_interval: usize,
        sample_rate: u64,
        filter: F,
    ) -> Self {
        assert!(report_interval > 0, "report_interval must be greater than 0");
        Latency {
            name: name.into(),
            report_interval,
            filter,
            measurer: LatencyMeasurer::new(sample_rate),
            count: 0,
        }
    }

    pub fn measurer(&self) -> &LatencyMeasurer {
        &self.measurer
    }

    pub fn inner(&self) -> &F {
        &self.filter
    }

    pub fn inner_mut(&mut self) -> &mut F {
        &mut self.filter
    }
}

impl<F: Filter> Filter for Latency<F> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        let out = {
            let _guard = self.measurer.measure_with_guard();
            self.filter.get(next)
        };
        self.count += 1;
        if self.count.is_multiple_of(self.report_interval) {
            info!("[{}] Latency: {}", self.name, self.measurer.format_stats());
        }
        out
    }
}

pub fn latency<F: Filter>(
    name: impl Into<String>,
    report_interval: usize,
    sample_rate: u64,
    filter: F,
) -> Latency<F> {
    Latency::new(name, report_interval, sample_rate, filter)
}
