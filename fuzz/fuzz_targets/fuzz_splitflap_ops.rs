#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use flap_core::flap::NullRenderer;
use flap_core::splitflap::{DataSource, Delegate, Splitflap};
use libfuzzer_sys::fuzz_target;
use web_time::Duration;

#[derive(Arbitrary, Debug)]
enum Op {
    Reload,
    Resize(u8),
    SetText(String),
    Animate(String, bool),
    Tick(u16),
    FinishStep(u8),
}

#[derive(Clone)]
struct Shape(Rc<Cell<usize>>);

impl DataSource for Shape {
    fn number_of_flaps(&self) -> usize {
        self.0.get()
    }
}

struct Steps(u8);

impl Delegate for Steps {
    fn rotation_duration(&self, index: usize) -> Duration {
        Duration::from_millis(u64::from(self.0) + index as u64 % 3)
    }
}

fuzz_target!(|input: (u8, Vec<Op>)| {
    let (step_ms, ops) = input;
    let flaps = Rc::new(Cell::new(4));
    let outstanding = Rc::new(Cell::new(0usize));
    let mut row: Splitflap<NullRenderer> = Splitflap::new()
        .with_data_source(Shape(Rc::clone(&flaps)))
        .with_delegate(Steps(step_ms));
    row.reload();

    for op in ops.into_iter().take(512) {
        match op {
            Op::Reload => row.reload(),
            Op::Resize(n) => flaps.set(usize::from(n % 16)),
            Op::SetText(text) => row.set_text(Some(&text)),
            Op::Animate(text, with_callback) => {
                let callback = with_callback.then(|| {
                    outstanding.set(outstanding.get() + 1);
                    let handle = Rc::clone(&outstanding);
                    Box::new(move || handle.set(handle.get() - 1)) as Box<dyn FnOnce()>
                });
                row.update_text(Some(&text), true, callback);
            }
            Op::Tick(ms) => row.tick(Duration::from_millis(u64::from(ms))),
            Op::FinishStep(i) => {
                if let Some(id) = row.flap_id(usize::from(i)) {
                    row.finish_step(id);
                }
            }
        }
    }

    // Every completion runs exactly once by the time the row is rebuilt.
    row.reload();
    assert_eq!(outstanding.get(), 0);
});
