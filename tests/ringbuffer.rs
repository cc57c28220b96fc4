use cosa_events::Core::QueueError;
use cosa_events::Events::types::{SAMPLE_REQUEST_TYPE, USER_TYPE, WATCHDOG_TYPE};
use cosa_events::{Event, EventQueue, Handler, QUEUE_MAX};

struct Probe;
impl Handler for Probe {}

static PROBE: Probe = Probe;

#[test]
fn simple_enqueue_dequeue() {
    let queue = EventQueue::<16>::new();
    let event = Event::new(WATCHDOG_TYPE, Some(&PROBE), 1234);

    assert!(queue.enqueue(&event));
    assert_eq!(queue.available(), 1);

    let mut out = Event::default();
    assert!(queue.dequeue(&mut out));
    assert_eq!(out, event);
    assert!(out.same_target(&event));
    assert_eq!(out.kind(), WATCHDOG_TYPE);
    assert_eq!(out.value(), 1234);
    assert!(queue.is_empty());
}

#[test]
fn fresh_queue_is_empty() {
    let queue = EventQueue::<16>::new();
    assert_eq!(queue.capacity(), 16);
    assert_eq!(queue.available(), 0);
    assert!(queue.is_empty());
    assert!(!queue.is_full());

    let sentinel = Event::new(USER_TYPE, None, 99);
    let mut out = sentinel;
    assert!(!queue.dequeue(&mut out));
    assert_eq!(out, sentinel, "failed dequeue must leave the output untouched");
    assert_eq!(queue.available(), 0);
    assert_eq!(queue.try_dequeue(), Err(QueueError::Empty));
}

#[test]
fn sixteen_samples_in_order() {
    let queue = EventQueue::<QUEUE_MAX>::new();

    for value in 0..16u16 {
        assert!(queue.push(SAMPLE_REQUEST_TYPE, None, value));
    }
    assert!(queue.is_full());
    assert!(!queue.push(SAMPLE_REQUEST_TYPE, None, 16));
    assert_eq!(queue.available(), 16);

    let mut out = Event::default();
    for value in 0..16u16 {
        assert!(queue.dequeue(&mut out));
        assert_eq!(out.kind(), SAMPLE_REQUEST_TYPE);
        assert_eq!(out.value(), value);
    }
    assert!(!queue.dequeue(&mut out));
    assert_eq!(out.value(), 15);
    assert!(queue.is_empty());
}

#[test]
fn full_buffer() {
    let queue = EventQueue::<4>::new();

    for i in 0..4 {
        assert!(queue.push(USER_TYPE, None, i));
    }

    // Next enqueue should fail
    assert_eq!(
        queue.try_enqueue(Event::new(USER_TYPE, None, 4)),
        Err(QueueError::Full { capacity: 4 })
    );
    assert_eq!(queue.available(), 4);
    assert_eq!(queue.dropped(), 1);

    // Dequeue one
    assert_eq!(queue.pop().map(|e| e.value()), Some(0));

    // Enqueue should succeed now, into the slot just freed
    assert_eq!(queue.try_enqueue(Event::new(USER_TYPE, None, 5)), Ok(0));

    let rest: Vec<u16> = std::iter::from_fn(|| queue.pop()).map(|e| e.value()).collect();
    assert_eq!(rest, vec![1, 2, 3, 5]);
}

#[test]
fn rejected_event_leaves_entries_intact() {
    let queue = EventQueue::<2>::new();
    let first = Event::new(1, Some(&PROBE), 10);
    let second = Event::new(2, None, 20);

    assert!(queue.enqueue(&first));
    assert!(queue.enqueue(&second));
    for _ in 0..10 {
        assert!(!queue.enqueue(&Event::new(3, None, 30)));
    }
    assert_eq!(queue.dropped(), 10);

    assert_eq!(queue.pop(), Some(first));
    assert_eq!(queue.pop(), Some(second));
    assert_eq!(queue.pop(), None);
}

#[test]
fn wraps_around_many_laps() {
    let queue = EventQueue::<8>::new();
    let mut next_in = 0u16;
    let mut next_out = 0u16;

    for lap in 0..500 {
        let burst = 1 + lap % 8;
        for _ in 0..burst {
            assert!(queue.push(USER_TYPE, None, next_in));
            next_in = next_in.wrapping_add(1);
        }
        for _ in 0..burst {
            let event = queue.pop().expect("pending event");
            assert_eq!(event.value(), next_out);
            next_out = next_out.wrapping_add(1);
        }
        assert!(queue.is_empty());
    }
}

#[test]
fn single_slot_queue() {
    let queue = EventQueue::<1>::new();
    assert!(queue.push(USER_TYPE, None, 1));
    assert!(queue.is_full());
    assert!(!queue.push(USER_TYPE, None, 2));
    assert_eq!(queue.pop().map(|e| e.value()), Some(1));
    assert!(queue.push(USER_TYPE, None, 3));
    assert_eq!(queue.pop().map(|e| e.value()), Some(3));
}

#[test]
fn push_env_keeps_the_full_address() {
    static TABLE: [u8; 4] = [1, 2, 3, 4];
    let queue = EventQueue::<4>::new();

    assert!(queue.push_env(USER_TYPE, None, TABLE.as_ptr()));
    let event = queue.pop().expect("pending event");
    assert_eq!(event.env::<u8>(), TABLE.as_ptr());
}

#[test]
fn debug_reports_occupancy() {
    let queue = EventQueue::<4>::new();
    queue.push(USER_TYPE, None, 0);
    let text = format!("{queue:?}");
    assert!(text.contains("capacity: 4"), "{text}");
    assert!(text.contains("available: 1"), "{text}");
}

#[test]
fn error_labels() {
    assert_eq!(QueueError::Full { capacity: 16 }.as_label(), "queue_full");
    assert_eq!(QueueError::Empty.as_label(), "queue_empty");
    assert_eq!(
        QueueError::Full { capacity: 16 }.to_string(),
        "event queue full (16 slots); event dropped"
    );
}
