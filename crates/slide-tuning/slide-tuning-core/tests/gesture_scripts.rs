use serde::Deserialize;
use slide_tuning::{HeadlessSurface, InputEvent, TuningConfig, TuningEvent, TuningSession};
use slide_tuning_test_fixtures::gestures;

#[derive(Debug, Deserialize)]
struct Script {
    config: TuningConfig,
    steps: Vec<Step>,
    #[serde(rename = "final")]
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Step {
    input: InputEvent,
    #[serde(default = "delivered_by_default")]
    delivered: bool,
    #[serde(default)]
    events: Option<Vec<TuningEvent>>,
}

fn delivered_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Expected {
    value: f64,
    text: String,
    dragging: bool,
    listeners: usize,
}

fn run_script(name: &str) {
    let script: Script = gestures::load(name).unwrap();
    let mut session = TuningSession::new(script.config, HeadlessSurface::new()).unwrap();

    for (i, step) in script.steps.iter().enumerate() {
        let delivered = session.surface_mut().deliver(&step.input);
        assert_eq!(
            delivered, step.delivered,
            "{name} step {i}: delivery of {:?}",
            step.input
        );
        if !delivered {
            continue;
        }
        let outputs = session.handle(&step.input).unwrap();
        if let Some(expected) = &step.events {
            assert_eq!(&outputs.events, expected, "{name} step {i}");
        }
    }

    assert_eq!(session.value(), script.expected.value, "{name}: value");
    assert_eq!(session.surface().text(), script.expected.text, "{name}: text");
    assert_eq!(session.is_dragging(), script.expected.dragging, "{name}");
    assert_eq!(
        session.surface().live_listener_count(),
        script.expected.listeners,
        "{name}: listeners"
    );
}

#[test]
fn drag_and_commit() {
    run_script("drag-and-commit");
}

#[test]
fn ctrl_step() {
    run_script("ctrl-step");
}

#[test]
fn alt_fine_tuning() {
    run_script("alt-fine-tuning");
}

#[test]
fn sub_threshold_moves() {
    run_script("sub-threshold-moves");
}

#[test]
fn vertical_drag() {
    run_script("vertical-drag");
}

#[test]
fn context_menu_cancel() {
    run_script("context-menu-cancel");
}

#[test]
fn escape_cancel() {
    run_script("escape-cancel");
}

#[test]
fn secondary_button_ignored() {
    run_script("secondary-button-ignored");
}

#[test]
fn every_manifest_script_runs() {
    for name in gestures::keys() {
        run_script(&name);
    }
}
