// In demos/main_loop.rs
//
// A timer thread stands in for an interrupt source: every tick it pushes a
// sample request for the analog channel, and the channel answers with a
// completion event. The main loop dispatches until Ctrl-C.
//
// RUST_LOG=debug cargo run --example main_loop

use cosa_events::Events::types::{SAMPLE_COMPLETED_TYPE, SAMPLE_REQUEST_TYPE, WATCHDOG_TYPE};
use cosa_events::Queue::{DispatcherBuilder, IdleStrategy};
use cosa_events::{Event, Handler, Value};
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct AnalogPin {
    channel: u8,
    level: AtomicU16,
}

impl Handler for AnalogPin {
    fn on_event(&self, kind: u8, value: Value) {
        match kind {
            SAMPLE_REQUEST_TYPE => {
                // fake conversion; a real driver would start the ADC here
                let sample = value.get().wrapping_mul(37) & 0x3ff;
                self.level.store(sample, Ordering::Relaxed);
                if !Event::push(SAMPLE_COMPLETED_TYPE, Some(&PIN), sample) {
                    log::warn!("pin {}: completion dropped", self.channel);
                }
            }
            SAMPLE_COMPLETED_TYPE => {
                println!("pin {} sample {:4}", self.channel, value.get());
            }
            _ => {}
        }
    }
}

static PIN: AnalogPin = AnalogPin {
    channel: 0,
    level: AtomicU16::new(0),
};

fn main() {
    env_logger::init();

    let dispatcher = DispatcherBuilder::new()
        .with_idle(IdleStrategy::Park(Duration::from_millis(50)))
        .build(Event::queue())
        .expect("valid dispatcher config");

    let running = dispatcher.stop_handle();
    let ticking = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        let ticking = ticking.clone();
        ctrlc::set_handler(move || {
            ticking.store(false, Ordering::Release);
            running.store(false, Ordering::Release);
        })
        .expect("Error setting Ctrl-C handler");
    }

    let timer = {
        let ticking = ticking.clone();
        thread::spawn(move || {
            let mut tick: u16 = 0;
            while ticking.load(Ordering::Acquire) {
                thread::sleep(Duration::from_millis(100));
                tick = tick.wrapping_add(1);
                Event::push(SAMPLE_REQUEST_TYPE, Some(&PIN), tick);
                if tick % 10 == 0 {
                    // nobody listens: dispatched as a no-op
                    Event::push(WATCHDOG_TYPE, None, tick);
                }
            }
        })
    };

    println!("Main loop running, press Ctrl-C to stop");
    let delivered = dispatcher.run();

    ticking.store(false, Ordering::Release);
    timer.join().expect("timer thread panicked");
    println!(
        "Stopped after {} events (last level {})",
        delivered,
        PIN.level.load(Ordering::Relaxed)
    );
}
