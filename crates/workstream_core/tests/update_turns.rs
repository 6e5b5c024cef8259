use std::sync::Once;

use pretty_assertions::assert_eq;
use workstream_core::{
    update, AppState, Effect, Msg, Notice, Role, TurnState, THINKING_PLACEHOLDER,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(workstream_logging::initialize_for_tests);
}

fn start_run(state: AppState, prompt: &str, run_id: u64) -> AppState {
    let (state, effects) = update(state, Msg::PromptSubmitted(prompt.to_string()));
    assert_eq!(
        effects,
        vec![Effect::LaunchRun {
            request: prompt.to_string()
        }]
    );
    let (state, _) = update(
        state,
        Msg::RunStarted {
            run_id,
            request: prompt.to_string(),
        },
    );
    state
}

#[test]
fn new_session_greets_with_welcome() {
    init_logging();
    let view = AppState::new("Welcome to the workflow").view();

    assert_eq!(view.turn, TurnState::Idle);
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].role, Role::Responder);
    assert_eq!(view.messages[0].content, "Welcome to the workflow");
    assert_eq!(view.live_preview, None);
}

#[test]
fn empty_prompt_is_a_noop() {
    init_logging();
    let state = AppState::new("Welcome");

    for prompt in ["", "   ", "\n\t"] {
        let (next, effects) = update(state.clone(), Msg::PromptSubmitted(prompt.to_string()));
        assert!(effects.is_empty());
        assert_eq!(next, state);
        assert_eq!(next.turn(), TurnState::Idle);
        assert_eq!(next.transcript().len(), 1);
    }
}

#[test]
fn prompt_requests_launch_and_shows_thinking() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new("Welcome"),
        Msg::PromptSubmitted("plan a trip".into()),
    );

    assert_eq!(
        effects,
        vec![Effect::LaunchRun {
            request: "plan a trip".to_string()
        }]
    );
    assert_eq!(state.turn(), TurnState::Launching);
    assert_eq!(state.view().live_preview.as_deref(), Some(THINKING_PLACEHOLDER));
    // Requester message is only recorded once the run actually starts.
    assert_eq!(state.transcript().len(), 1);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn drained_run_appends_exactly_one_responder_message() {
    init_logging();
    let state = start_run(AppState::new("Welcome"), "go", 1);
    assert_eq!(state.turn(), TurnState::Streaming { run_id: 1 });

    let (state, _) = update(
        state,
        Msg::SnapshotRendered {
            run_id: 1,
            text: "A".into(),
        },
    );
    assert_eq!(state.view().live_preview.as_deref(), Some("A"));
    // Intermediate snapshots never touch the transcript.
    assert_eq!(state.transcript().len(), 2);

    let (state, effects) = update(
        state,
        Msg::RunDrained {
            run_id: 1,
            text: "ABC".into(),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.turn, TurnState::Idle);
    assert_eq!(view.live_preview, None);
    let roles: Vec<_> = view.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::Responder, Role::Requester, Role::Responder]);
    assert_eq!(view.messages[1].content, "go");
    assert_eq!(view.messages[2].content, "ABC");
    let positions: Vec<_> = view.messages.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn job_without_output_still_records_empty_reply() {
    init_logging();
    let state = start_run(AppState::new("Welcome"), "quiet", 4);
    let (state, _) = update(
        state,
        Msg::RunDrained {
            run_id: 4,
            text: String::new(),
        },
    );

    let last = state.transcript().last().unwrap();
    assert_eq!(last.role, Role::Responder);
    assert_eq!(last.content, "");
}

#[test]
fn prompt_while_streaming_is_rejected() {
    init_logging();
    let state = start_run(AppState::new("Welcome"), "first", 1);

    let (state, effects) = update(state, Msg::PromptSubmitted("second".into()));
    assert_eq!(effects, vec![Effect::Notify(Notice::Busy)]);
    assert_eq!(state.turn(), TurnState::Streaming { run_id: 1 });
    assert_eq!(state.transcript().len(), 2);
}

#[test]
fn stale_run_messages_are_ignored() {
    init_logging();
    let state = start_run(AppState::new("Welcome"), "go", 2);

    let (state, _) = update(
        state,
        Msg::SnapshotRendered {
            run_id: 1,
            text: "old".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::RunDrained {
            run_id: 1,
            text: "old".into(),
        },
    );

    assert_eq!(state.turn(), TurnState::Streaming { run_id: 2 });
    assert_eq!(state.view().live_preview.as_deref(), Some(THINKING_PLACEHOLDER));
    assert_eq!(state.transcript().len(), 2);
}

#[test]
fn launch_failure_returns_to_idle_without_transcript_entry() {
    init_logging();
    let (state, _) = update(AppState::new("Welcome"), Msg::PromptSubmitted("go".into()));
    let (state, effects) = update(
        state,
        Msg::LaunchFailed {
            reason: "workflow has no steps".into(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::LaunchFailed {
            reason: "workflow has no steps".to_string()
        })]
    );
    assert_eq!(state.turn(), TurnState::Idle);
    assert_eq!(state.transcript().len(), 1);
}

#[test]
fn reset_restores_welcome_only_between_runs() {
    init_logging();
    let state = start_run(AppState::new("Welcome"), "go", 1);

    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::Notify(Notice::ResetIgnored)]);
    assert_eq!(state.transcript().len(), 2);

    let (state, _) = update(
        state,
        Msg::RunDrained {
            run_id: 1,
            text: "done".into(),
        },
    );
    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    assert_eq!(state.transcript().len(), 1);
    assert_eq!(state.transcript().messages()[0].content, "Welcome");
}
