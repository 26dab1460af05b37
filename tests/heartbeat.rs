//! Integration tests for the heartbeat emitter and its shutdown path.

use std::time::Duration;
use sysbeat::heartbeat::{Heartbeat, SHUTDOWN_MESSAGE};
use sysbeat::shutdown;

const MESSAGE: &str = "Hello from container v1.1";

fn count_beats(output: &[u8]) -> usize {
    String::from_utf8_lossy(output)
        .lines()
        .filter(|line| *line == MESSAGE)
        .count()
}

fn count_shutdown_messages(output: &[u8]) -> usize {
    String::from_utf8_lossy(output)
        .lines()
        .filter(|line| *line == SHUTDOWN_MESSAGE)
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_one_line_per_second_until_cancelled() {
    let (trigger, token) = shutdown::channel();
    let heartbeat = Heartbeat::new(Vec::new(), MESSAGE, Duration::from_secs(1));
    let task = tokio::spawn(heartbeat.run(token));

    // Beats at t=0, 1, 2 and 3.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    trigger.trigger();

    let output = task.await.unwrap().unwrap();
    assert_eq!(count_beats(&output), 4);
    assert_eq!(count_shutdown_messages(&output), 1);
    assert!(String::from_utf8_lossy(&output).ends_with(&format!("{}\n", SHUTDOWN_MESSAGE)));
}

#[tokio::test(start_paused = true)]
async fn test_beat_count_tracks_elapsed_seconds() {
    let elapsed = 10;
    let (trigger, token) = shutdown::channel();
    let heartbeat = Heartbeat::new(Vec::new(), MESSAGE, Duration::from_secs(1));
    let task = tokio::spawn(heartbeat.run(token));

    tokio::time::sleep(Duration::from_secs(elapsed) + Duration::from_millis(500)).await;
    trigger.trigger();

    let output = task.await.unwrap().unwrap();
    let beats = count_beats(&output) as u64;
    assert!(
        (elapsed - 1..=elapsed + 1).contains(&beats),
        "expected about {} beats, got {}",
        elapsed,
        beats
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_during_sleep_exits_within_one_interval() {
    let (trigger, token) = shutdown::channel();
    let heartbeat = Heartbeat::new(Vec::new(), MESSAGE, Duration::from_secs(60));
    let task = tokio::spawn(heartbeat.run(token));

    tokio::time::sleep(Duration::from_secs(1)).await;
    trigger.trigger();

    let output = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("heartbeat did not stop after cancellation")
        .unwrap()
        .unwrap();
    assert_eq!(count_beats(&output), 1);
    assert_eq!(count_shutdown_messages(&output), 1);
}

#[tokio::test]
async fn test_cancelled_before_start_prints_only_shutdown_message() {
    let (trigger, token) = shutdown::channel();
    trigger.trigger();

    let heartbeat = Heartbeat::new(Vec::new(), MESSAGE, Duration::from_secs(1));
    let output = heartbeat.run(token).await.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), format!("{}\n", SHUTDOWN_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_dropped_trigger_stops_the_emitter() {
    let (trigger, token) = shutdown::channel();
    let heartbeat = Heartbeat::new(Vec::new(), "tick", Duration::from_secs(1));
    let task = tokio::spawn(heartbeat.run(token));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    drop(trigger);

    let output = task.await.unwrap().unwrap();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, format!("tick\ntick\n{}\n", SHUTDOWN_MESSAGE));
}
