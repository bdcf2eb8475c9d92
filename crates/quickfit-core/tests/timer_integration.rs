//! End-to-end checks of the engine rules through the public API.

use std::time::Duration;

use chrono::{Local, TimeZone};
use quickfit_core::timer::FixedClock;
use quickfit_core::{
    Config, EngineSettings, Event, HoldSettings, TimerEngine, TimerMode, TimerRuntime,
    TimerStatus,
};

#[test]
fn countdown_session_uses_initial_value_not_final() {
    let at = Local.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap();
    let mut engine = TimerEngine::default().with_clock(FixedClock(at));
    engine.adjust(-4);
    assert_eq!(engine.state().value(), 60);

    engine.start();
    let mut completed = Vec::new();
    for _ in 0..120 {
        if let Some(event) = engine.tick() {
            completed.push(event);
        }
    }

    assert_eq!(completed.len(), 1);
    let session = completed[0].logged_session().expect("completion logs");
    assert_eq!(session.duration_label, "01:00");
    assert_eq!(session.completed_at, at);
    assert_eq!(engine.state().value(), 0);
    assert_eq!(engine.state().status(), TimerStatus::Stopped);
}

#[test]
fn logging_asymmetry_between_modes() {
    let mut engine = TimerEngine::default();

    // countdown stopped by hand: nothing
    engine.start();
    engine.tick();
    engine.stop();
    assert!(engine.sessions().is_empty());

    // count-up stopped by hand: logged
    engine.set_mode(TimerMode::CountUp);
    engine.start();
    for _ in 0..75 {
        engine.tick();
    }
    engine.stop();

    // countdown run out: logged
    engine.set_mode(TimerMode::Countdown);
    engine.adjust(-4);
    engine.start();
    for _ in 0..60 {
        engine.tick();
    }

    let labels: Vec<(&str, TimerMode)> = engine
        .sessions()
        .all()
        .map(|s| (s.duration_label.as_str(), s.mode))
        .collect();
    assert_eq!(
        labels,
        vec![("01:00", TimerMode::Countdown), ("01:15", TimerMode::CountUp)]
    );
}

#[test]
fn engine_settings_come_from_config() {
    let mut config = Config::default();
    config.set("timer.countdown_default_secs", "90").unwrap();
    config.set("timer.tick_cue_threshold_secs", "3").unwrap();
    let settings = EngineSettings::from(&config);
    assert_eq!(settings.countdown_default_secs, 90);
    assert_eq!(settings.tick_cue_threshold_secs, 3);
    assert_eq!(TimerEngine::new(settings).state().value(), 90);
}

#[tokio::test(start_paused = true)]
async fn runtime_hold_then_run_then_complete() {
    let mut runtime = TimerRuntime::new(
        TimerEngine::new(EngineSettings {
            countdown_default_secs: 0,
            tick_cue_threshold_secs: 5,
        }),
        HoldSettings {
            delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(100),
        },
    );
    let mut events = runtime.subscribe();

    // immediate +1, then repeats at 600 and 700 ms
    runtime.press_start(1).unwrap();
    tokio::time::sleep(Duration::from_millis(750)).await;
    runtime.press_end();
    assert_eq!(runtime.state().unwrap().value(), 180);

    runtime.start().unwrap();
    tokio::time::sleep(Duration::from_secs(181)).await;

    let state = runtime.state().unwrap();
    assert_eq!(state.value(), 0);
    assert!(!state.is_running());
    assert!(!runtime.is_ticking());

    let sessions = runtime.sessions().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].duration_label, "03:00");

    let mut completions = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, Event::TimerCompleted { .. }) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
}
