use handray_core::FrameTick;
use handray_testkit::{EventRecord, JsonlSink};

#[test]
fn event_stream_can_be_written() {
    let mut sink = JsonlSink::create(std::env::temp_dir().join("handray-eventlog.jsonl"))
        .expect("can create temp log");
    let tick = FrameTick::ZERO.advance(1);
    let record = EventRecord::new(tick, "SmokeTest", "ok");
    sink.write(&record).expect("can write event");
    assert_eq!(sink.written(), 1);
}
