use crate::{AppState, Effect, Msg, Notice, TurnState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PromptSubmitted(prompt) => {
            // An empty prompt produces no turn at all.
            if prompt.trim().is_empty() {
                return (state, Vec::new());
            }
            if state.turn() != TurnState::Idle {
                return (state, vec![Effect::Notify(Notice::Busy)]);
            }
            state.begin_launch();
            vec![Effect::LaunchRun { request: prompt }]
        }
        Msg::RunStarted { run_id, request } => {
            if state.turn() == TurnState::Launching {
                state.start_streaming(run_id, request);
            }
            Vec::new()
        }
        Msg::LaunchFailed { reason } => {
            if state.turn() == TurnState::Launching {
                state.abort_launch();
            }
            vec![Effect::Notify(Notice::LaunchFailed { reason })]
        }
        Msg::SnapshotRendered { run_id, text } => {
            if state.turn() == (TurnState::Streaming { run_id }) {
                state.set_preview(text);
            }
            Vec::new()
        }
        Msg::RunDrained { run_id, text } => {
            if state.turn() == (TurnState::Streaming { run_id }) {
                state.finish_run(text);
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.turn() == TurnState::Idle {
                state.reset();
                Vec::new()
            } else {
                vec![Effect::Notify(Notice::ResetIgnored)]
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
