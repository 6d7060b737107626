//! End-to-end flows over the public API: commands driving the machine, the
//! event stream they produce, and schedule handles going stale.

use std::sync::{Arc, Mutex};

use pomotick_core::timer::{BREAK_DURATION_SECS, COMPLETE_DURATION_SECS, WORK_DURATION_SECS};
use pomotick_core::{
    CoreError, PauseType, TimerCommand, TimerEvent, TimerState, TimerStateMachine,
};

fn attach_log(machine: &mut TimerStateMachine) -> Arc<Mutex<Vec<TimerEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    machine.on_event(move |event| sink.lock().unwrap().push(event.clone()));
    log
}

fn tick_n(machine: &mut TimerStateMachine, n: u64) {
    for _ in 0..n {
        let id = machine.active_schedule().expect("a schedule should be live");
        assert!(machine.tick(id));
    }
}

#[test]
fn full_session_flow() {
    let mut machine = TimerStateMachine::new();
    let log = attach_log(&mut machine);

    assert!(TimerCommand::StartWork.can_execute(&machine));
    assert!(TimerCommand::StartWork.execute(&mut machine));
    assert_eq!(machine.state(), TimerState::Work);
    assert_eq!(machine.time(), WORK_DURATION_SECS);

    tick_n(&mut machine, 10);
    assert_eq!(machine.time(), WORK_DURATION_SECS - 10);

    assert!(TimerCommand::Pause.execute(&mut machine));
    assert_eq!(machine.pause_kind(), Some(PauseType::FromWork));
    assert_eq!(machine.time(), WORK_DURATION_SECS - 10);

    assert!(TimerCommand::Resume.execute(&mut machine));
    assert_eq!(machine.state(), TimerState::Work);
    assert_eq!(machine.time(), WORK_DURATION_SECS - 10);

    // Forcing a break mid-work starts it fresh; nothing was paused.
    assert!(TimerCommand::ForceBreak.can_execute(&machine));
    assert!(TimerCommand::ForceBreak.execute(&mut machine));
    assert_eq!(machine.state(), TimerState::Break);
    assert_eq!(machine.time(), BREAK_DURATION_SECS);

    assert!(TimerCommand::Stop.execute(&mut machine));
    assert_eq!(machine.state(), TimerState::Stop);
    assert_eq!(machine.time(), 0);

    let changes = log
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, TimerEvent::StateChanged { .. }))
        .count();
    assert_eq!(changes, 5);
}

#[test]
fn work_runs_into_overtime() {
    let mut machine = TimerStateMachine::new();
    let log = attach_log(&mut machine);

    TimerCommand::StartWork.execute(&mut machine);
    tick_n(&mut machine, WORK_DURATION_SECS);
    assert_eq!(machine.state(), TimerState::WorkComplete);
    assert_eq!(machine.time(), COMPLETE_DURATION_SECS);

    tick_n(&mut machine, COMPLETE_DURATION_SECS);
    assert_eq!(machine.state(), TimerState::WorkOvertime);
    assert_eq!(machine.time(), 0);

    tick_n(&mut machine, 3);
    assert_eq!(machine.time(), 3);

    // The finished phase is announced before the transition it causes.
    let log = log.lock().unwrap();
    let completed_work = log
        .iter()
        .position(|event| {
            matches!(
                event,
                TimerEvent::TimerCompleted {
                    state: TimerState::Work,
                    ..
                }
            )
        })
        .expect("work completion should be announced");
    assert!(matches!(
        log[completed_work + 1],
        TimerEvent::StateChanged {
            from: TimerState::Work,
            to: TimerState::WorkComplete,
            ..
        }
    ));
    assert!(log.iter().any(|event| matches!(
        event,
        TimerEvent::TimerCompleted {
            state: TimerState::WorkComplete,
            ..
        }
    )));
}

#[test]
fn completed_break_offers_work_only() {
    let mut machine = TimerStateMachine::new();
    TimerCommand::StartWork.execute(&mut machine);
    TimerCommand::ForceBreak.execute(&mut machine);
    tick_n(&mut machine, BREAK_DURATION_SECS);
    assert_eq!(machine.state(), TimerState::BreakComplete);

    assert!(TimerCommand::StartWork.can_execute(&machine));
    assert!(!TimerCommand::StartBreak.can_execute(&machine));
    assert!(!TimerCommand::Pause.can_execute(&machine));
    assert!(!TimerCommand::Resume.can_execute(&machine));
    assert!(TimerCommand::Stop.can_execute(&machine));

    assert!(TimerCommand::StartWork.execute(&mut machine));
    assert_eq!(machine.state(), TimerState::Work);
    assert_eq!(machine.time(), WORK_DURATION_SECS);
}

#[test]
fn stale_handles_stop_emitting() {
    let mut machine = TimerStateMachine::new();
    TimerCommand::StartWork.execute(&mut machine);
    let log = attach_log(&mut machine);

    let work_schedule = machine.active_schedule().expect("work schedule");
    tick_n(&mut machine, 2);
    assert_eq!(log.lock().unwrap().len(), 2);

    TimerCommand::ForceBreak.execute(&mut machine);
    let break_schedule = machine.active_schedule().expect("break schedule");

    let before = log.lock().unwrap().len();
    assert!(!machine.tick(work_schedule));
    assert_eq!(log.lock().unwrap().len(), before);

    assert!(machine.tick(break_schedule));
    assert_eq!(log.lock().unwrap().len(), before + 1);
}

#[test]
fn factory_drives_machine_from_names() {
    let mut machine = TimerStateMachine::new();

    for name in ["start-work", "pause", "resume", "stop"] {
        let command = TimerCommand::from_name(name).unwrap();
        assert!(command.can_execute(&machine), "{name} should be allowed");
        assert!(command.execute(&mut machine));
    }
    assert_eq!(machine.state(), TimerState::Stop);

    let err = TimerCommand::from_name("coffee-break").unwrap_err();
    assert!(matches!(err, CoreError::UnknownCommand(_)));
}
