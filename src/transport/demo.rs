// Demo mode: play a scripted game session to showcase the renderer
//
// The script exercises the whole tag set: palette colors, RGB and 256-color
// tokens, tooltips, vitals aliases, clickable commands, items, batched
// frames, prompts continued by echoes and output split across events.
//
// Run with: TALETERM_DEMO=1 cargo run --release

use crate::events::{topics, ServerEvent};
use crate::session::Action;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

/// Play the demo script, then idle until shutdown
pub async fn run_demo(tx: mpsc::Sender<Action>, mut shutdown_rx: oneshot::Receiver<()>) {
    // Initial delay to let TUI render
    sleep(Duration::from_millis(800)).await;

    for (action, delay_ms) in generate_demo_sequence() {
        // Check for shutdown signal before sending
        if shutdown_rx.try_recv().is_ok() {
            return;
        }

        if tx.send(action).await.is_err() {
            break;
        }

        sleep(Duration::from_millis(delay_ms)).await;
    }

    // Keep running so TUI stays active, but listen for shutdown
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::info!("Demo received shutdown signal");
                return;
            }
            _ = sleep(Duration::from_secs(60)) => {}
        }
    }
}

fn display(data: Value) -> Action {
    Action::Received(ServerEvent::display(data))
}

fn send(text: &str) -> Action {
    Action::Sent {
        text: text.to_string(),
    }
}

fn color(foreground: &str, children: Value) -> Value {
    json!({"name": "color", "attributes": {"foreground": foreground}, "children": children})
}

fn prompt(hp: u32, sp: u32, ep: u32) -> Action {
    display(json!([
        "[",
        {"name": "hp", "children": [color("red", json!([hp.to_string()]))]},
        "hp ",
        {"name": "sp", "children": [color("blue", json!([sp.to_string()]))]},
        "sp ",
        {"name": "ep", "children": [color("green", json!([ep.to_string()]))]},
        "ep] > "
    ]))
}

pub(crate) fn generate_demo_sequence() -> Vec<(Action, u64)> {
    vec![
        (Action::Connected, 300),
        // === Welcome banner ===
        (
            display(json!([
                color("256:208", json!(["Welcome to "])),
                {
                    "name": "color",
                    "attributes": {"foreground": "255,215,0", "underline": "true"},
                    "children": ["Kantele"]
                },
                color("256:208", json!([", a world of songs and stories.\n\n"]))
            ])),
            700,
        ),
        (
            display(json!([
                "Type ",
                {"name": "command", "attributes": {"send": "help"}, "children": ["help"]},
                " to get started.\n"
            ])),
            900,
        ),
        (prompt(50, 30, 40), 1200),
        // === Look around ===
        (send("look"), 400),
        (
            display(json!([
                "\n",
                color("cyan", json!(["The Town Square\n"])),
                "A fountain murmurs in the middle of the square. ",
                {
                    "name": "tooltip",
                    "attributes": {"text": "Carved from grey granite"},
                    "children": ["Old stone benches"]
                },
                " line the edges.\n",
                "You see ",
                {
                    "name": "item",
                    "attributes": {"name": "a rusty lantern", "description": "It still smells of oil."},
                    "children": [color("yellow", json!(["a rusty lantern"]))]
                },
                " here.\n",
                {"name": "character", "attributes": {"name": "Elias"}, "children": [color("magenta", json!(["Elias"]))]},
                " the bard is here, tuning a kantele.\n",
                "Exits: ",
                {"name": "command", "attributes": {"send": "north"}, "children": ["north"]},
                ", ",
                {"name": "command", "attributes": {"send": "east"}, "children": ["east"]},
                "\n"
            ])),
            1500,
        ),
        (prompt(50, 30, 40), 1500),
        // === Output split across frames ===
        (send("listen"), 400),
        (display(json!(["\nElias sings: ", color("green", json!(["\"The winter "]))])), 600),
        (display(json!([color("green", json!(["was long, the ice was deep...\"\n"]))])), 1200),
        // === Batched frame ===
        (
            Action::Received(ServerEvent::new(
                topics::MULTIPLE,
                json!([
                    {"topic": "system/display", "data": [color("white", json!(["A cold wind blows from the north.\n"]))]},
                    {"topic": "system/pong"},
                    {"topic": "system/display", "data": [
                        {
                            "name": "color",
                            "attributes": {"foreground": "black", "background": "white"},
                            "children": [" Elias shivers. "]
                        },
                        "\n"
                    ]}
                ]),
            )),
            1200,
        ),
        (prompt(48, 30, 38), 1500),
        // === Combat ===
        (send("north"), 500),
        (
            display(json!([
                "\n",
                color("cyan", json!(["The Frozen Road\n"])),
                "A ",
                color("red", json!(["wolf"])),
                " snarls and leaps at you!\n",
                "The wolf bites you. ",
                color("#ff5f5f", json!(["[-12]"])),
                "\n"
            ])),
            1400,
        ),
        (prompt(36, 30, 31), 1800),
        (send("kill wolf"), 500),
        (
            display(json!([
                "\nYou strike the wolf. ",
                color("green", json!(["[-18]"])),
                "\nThe wolf flees ",
                {"name": "command", "attributes": {"send": "south"}, "children": ["south"]},
                ".\n"
            ])),
            1500,
        ),
        (prompt(36, 24, 22), 0),
    ]
}
