//! Copy service over the OSC 52 writer, plus busy-window properties.

use konami_clipboard::{
    CopyOptions, CopyService, CopyTarget, FEEDBACK_WINDOW_MS, Multiplexer, Osc52Clipboard,
};
use proptest::prelude::*;
use web_time::{Duration, Instant};

#[test]
fn osc52_copy_target_writes_sequence() {
    let writer = Osc52Clipboard::new(Vec::new()).with_multiplexer(Multiplexer::Screen);
    let mut service = CopyService::new(writer);

    assert!(service.copy_target(&CopyTarget::new("msg", "up up down down"), None));
    let out = service.into_writer().into_inner();
    assert_eq!(out, b"\x1bP\x1b]52;c;dXAgdXAgZG93biBkb3du\x07\x1b\\");
}

#[test]
fn oversized_payload_reports_false() {
    let writer = Osc52Clipboard::new(Vec::new()).with_max_payload(8);
    let mut service = CopyService::new(writer);
    assert!(!service.copy_text("this will not fit"));
    assert!(service.writer().get_ref().is_empty());
}

proptest! {
    #[test]
    fn busy_window_admits_one_copy(offsets in prop::collection::vec(0u64..2000, 1..32)) {
        let writer = Osc52Clipboard::new(Vec::new());
        let mut service = CopyService::new(writer);
        service.configure(CopyOptions::new());
        let target = CopyTarget::new("t", "x");
        let t0 = Instant::now();

        let mut sorted = offsets;
        sorted.sort_unstable();

        let mut last_copy: Option<u64> = None;
        for at in sorted {
            let now = t0 + Duration::from_millis(at);
            service.tick(now);
            let copied = service.copy_target_at(&target, None, now);
            let expected = last_copy.is_none_or(|prev| at >= prev + FEEDBACK_WINDOW_MS);
            prop_assert_eq!(copied, expected);
            if copied {
                last_copy = Some(at);
            }
        }
    }
}
