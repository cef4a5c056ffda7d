use colortap_core::{TickCallback, TickScheduler};
use gloo::timers::callback::Interval;
use std::time::Duration;

/// Largest delay `setInterval` honors; longer ones fire immediately.
const MAX_INTERVAL_MILLIS: u32 = i32::MAX as u32;

/// Browser ticks through `setInterval`; dropping the returned [`Interval`] clears it.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct IntervalScheduler;

impl TickScheduler for IntervalScheduler {
    type Handle = Interval;

    fn schedule_periodic(&mut self, period: Duration, on_tick: TickCallback) -> Self::Handle {
        let millis = interval_millis(period);
        log::trace!("interval every {}ms", millis);
        Interval::new(millis, on_tick)
    }
}

fn interval_millis(period: Duration) -> u32 {
    u32::try_from(period.as_millis())
        .unwrap_or(u32::MAX)
        .min(MAX_INTERVAL_MILLIS)
}
