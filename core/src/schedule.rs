use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::time::Duration;

pub type TickCallback = Box<dyn FnMut()>;

/// Source of periodic ticks.
///
/// The returned handle owns the timer: dropping it cancels the timer, so a handle stored next to the state it mutates
/// can never outlive that state.
pub trait TickScheduler {
    type Handle: 'static;

    fn schedule_periodic(&mut self, period: Duration, on_tick: TickCallback) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle) {
        drop(handle);
    }
}

type SharedCallback = Rc<RefCell<TickCallback>>;

struct ManualTimer {
    id: u64,
    period: Duration,
    elapsed: Duration,
    callback: SharedCallback,
}

#[derive(Default)]
struct Registry {
    timers: RefCell<Vec<ManualTimer>>,
    next_id: Cell<u64>,
}

impl Registry {
    fn is_active(&self, id: u64) -> bool {
        self.timers.borrow().iter().any(|timer| timer.id == id)
    }
}

/// Scheduler driven by hand, for tests and headless play.
///
/// Clones share the same set of timers.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    registry: Rc<Registry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn active_timers(&self) -> usize {
        self.registry.timers.borrow().len()
    }

    /// Fires every armed timer once, returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        let due: Vec<(u64, SharedCallback)> = self
            .registry
            .timers
            .borrow()
            .iter()
            .map(|timer| (timer.id, timer.callback.clone()))
            .collect();
        self.run(due.into_iter().map(|(id, callback)| (id, callback, 1)))
    }

    /// Lets `elapsed` pass, firing each timer once per full period.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let due: Vec<(u64, SharedCallback, u32)> = self
            .registry
            .timers
            .borrow_mut()
            .iter_mut()
            .map(|timer| {
                timer.elapsed += elapsed;
                let mut count = 0;
                while timer.elapsed >= timer.period {
                    timer.elapsed -= timer.period;
                    count += 1;
                }
                (timer.id, timer.callback.clone(), count)
            })
            .collect();
        self.run(due.into_iter())
    }

    fn run(&self, due: impl Iterator<Item = (u64, SharedCallback, u32)>) -> usize {
        let mut fired = 0;
        for (id, callback, count) in due {
            for _ in 0..count {
                // a callback may cancel its own or another timer
                if !self.registry.is_active(id) {
                    break;
                }
                (callback.borrow_mut())();
                fired += 1;
            }
        }
        fired
    }
}

impl core::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}

#[derive(Debug)]
pub struct ManualHandle {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.timers.borrow_mut().retain(|timer| timer.id != self.id);
        }
    }
}

impl TickScheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_periodic(&mut self, period: Duration, on_tick: TickCallback) -> Self::Handle {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry.timers.borrow_mut().push(ManualTimer {
            id,
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            callback: Rc::new(RefCell::new(on_tick)),
        });
        ManualHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }
}
