//! A scripted note sequence standing in for a live keyboard.

/// Key event at a position measured in beats.
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub beat: f64,
    pub note: u8,
    pub pressed: bool,
}

fn hold(events: &mut Vec<KeyEvent>, note: u8, from: f64, length: f64) {
    events.push(KeyEvent {
        beat: from,
        note,
        pressed: true,
    });
    events.push(KeyEvent {
        beat: from + length,
        note,
        pressed: false,
    });
}

/// C major arpeggio, a re-struck note while it still rings, then a chord.
pub fn demo() -> Vec<KeyEvent> {
    let mut events = Vec::new();

    for (i, note) in [48, 52, 55, 60].into_iter().enumerate() {
        hold(&mut events, note, i as f64 * 0.5, 0.4);
    }

    // strike G4 again while its first release still rings: crossfade tail
    hold(&mut events, 67, 2.0, 0.25);
    hold(&mut events, 67, 2.5, 0.25);

    for note in [48, 55, 64, 72] {
        hold(&mut events, note, 3.0, 2.0);
    }

    events.sort_by(|a, b| a.beat.total_cmp(&b.beat));
    events
}
