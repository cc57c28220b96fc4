// Allocation tracking for the enqueue/dequeue hot path
//
// dhat only allows one profiler per process, so the heap test is marked
// #[serial_test::serial] and lives alone in this binary.
//
// cargo test --test allocation_tracking -- --nocapture

use cosa_events::Events::types::SAMPLE_COMPLETED_TYPE;
use cosa_events::{Event, EventQueue, Handler};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

struct Adc;
impl Handler for Adc {}

static ADC: Adc = Adc;

#[test]
#[serial_test::serial]
fn enqueue_dequeue_do_not_allocate() {
    let queue = EventQueue::<16>::new();
    let mut out = Event::default();

    let _profiler = dhat::Profiler::builder().testing().build();
    let before = dhat::HeapStats::get();

    for round in 0..100u16 {
        for i in 0..16u16 {
            assert!(queue.push(SAMPLE_COMPLETED_TYPE, Some(&ADC), round * 16 + i));
        }
        assert!(!queue.push(SAMPLE_COMPLETED_TYPE, Some(&ADC), 0));
        while queue.dequeue(&mut out) {
            out.dispatch();
        }
    }

    let after = dhat::HeapStats::get();
    dhat::assert_eq!(after.total_blocks, before.total_blocks);
    dhat::assert_eq!(after.total_bytes, before.total_bytes);
}
