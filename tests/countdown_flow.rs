use countdown_ring::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn drive(countdown: &mut Countdown<ManualScheduler>, elapsed: Duration) -> usize {
    let due = countdown.scheduler_mut().advance(elapsed);
    let count = due.len();
    for tick in &due {
        countdown.handle_tick(tick);
    }
    count
}

fn plain(s: String) -> String {
    String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
}

#[test]
fn test_countdown_over_simulated_time() {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[])
        .with_on_completion(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    countdown
        .start_with_interval(10, Duration::from_secs(1))
        .unwrap();

    // 2.5 seconds at one tick per second.
    drive(&mut countdown, Duration::from_millis(2500));
    assert_eq!(countdown.text(), "8");
    assert!((countdown.progress() - 0.8).abs() < 1e-9);

    // Speed up four times; the half second already elapsed is dropped with
    // the old registration.
    countdown.accelerate(0.25).unwrap();
    assert_eq!(countdown.text(), "8");
    assert_eq!(countdown.interval(), Some(Duration::from_millis(250)));

    drive(&mut countdown, Duration::from_secs(1));
    assert_eq!(countdown.text(), "4");
    assert_eq!(completions.load(Ordering::SeqCst), 0);

    // Far more time than needed: only the remaining four ticks count.
    drive(&mut countdown, Duration::from_secs(30));
    assert!(countdown.completed());
    assert_eq!(countdown.text(), "0");
    assert_eq!(countdown.progress(), 0.0);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert!(!countdown.scheduler().is_active());
}

#[test]
fn test_teardown_after_two_of_five_ticks() {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[])
        .with_on_completion(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    countdown.start(5).unwrap();
    assert_eq!(drive(&mut countdown, Duration::from_secs(2)), 2);
    countdown.cancel();

    assert_eq!(drive(&mut countdown, Duration::from_secs(10)), 0);
    assert_eq!(countdown.text(), "3");
    assert!((countdown.progress() - 0.6).abs() < 1e-9);
    assert_eq!(countdown.status(), &Status::Idle);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[test]
fn test_accelerate_without_countdown() {
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[]);
    assert!(matches!(countdown.accelerate(0.5), Err(Error::NotRunning)));
    assert_eq!(countdown.status(), &Status::Idle);
    assert!(!countdown.scheduler().is_active());
}

#[test]
fn test_restyle_while_running() {
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[with_radius(2)]);
    countdown.start(9).unwrap();
    drive(&mut countdown, Duration::from_secs(3));

    countdown.apply(Configuration {
        font: Font::new(Weight::Faint),
        text_color: "#ff8800".to_string(),
        indicator: IndicatorConfig {
            stroke_width: 2,
            track_color: "#222222".to_string(),
            fill_color: "#ff8800".to_string(),
        },
    });

    assert_eq!(countdown.text(), "6");
    assert_eq!(countdown.indicator().configuration().stroke_width, 2);
    assert_eq!(countdown.label().font().weight, Weight::Faint);

    let rendered = plain(countdown.view());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[2].contains('6'));
}

#[test]
fn test_view_tracks_countdown() {
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[]);
    countdown.start(4).unwrap();

    let mut filled = Vec::new();
    loop {
        let rendered = plain(countdown.view());
        assert!(rendered.contains(countdown.text()));
        filled.push(rendered.chars().filter(|&c| c == '█').count());
        if drive(&mut countdown, Duration::from_secs(1)) == 0 {
            break;
        }
    }

    assert_eq!(filled.len(), 5);
    assert!(filled.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(filled.last(), Some(&0));
}

#[test]
fn test_invalid_start_reports_error() {
    let mut countdown = new_with_scheduler(ManualScheduler::new(), &[]);
    assert!(matches!(
        countdown.start(0),
        Err(Error::InvalidInitialValue)
    ));
    assert_eq!(countdown.remaining(), None);
    assert_eq!(countdown.scheduler().schedule_count(), 0);
}
