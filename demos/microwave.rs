//! Microwave Oven
//!
//! This demo drives a small hierarchical microwave controller.
//!
//! Key concepts:
//! - Composite state (DoorClosed) grouping Idle and Cooking
//! - Entry/exit hooks switching the lamp and the heater
//! - Guarded rules, internal rules and a handler closure
//! - Opening the door mid-cook exits Cooking before DoorClosed
//!
//! Run with: RUST_LOG=statecraft=debug cargo run --example microwave

use statecraft::builder::{HierarchyBuilder, RuleBuilder, StateBuilder};
use statecraft::core::{Reaction, State};
use statecraft::runtime::{DispatchOutcome, Machine};
use statecraft::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Oven {
        Top,
        DoorClosed,
        Idle,
        Cooking,
        DoorOpen,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Input {
    Open,
    Close,
    AddTime(u32),
    Start,
    Tick,
}

#[derive(Debug, Default)]
struct Hardware {
    lamp: bool,
    heater: bool,
    seconds: u32,
}

fn describe(hw: &Hardware) -> String {
    format!(
        "lamp={} heater={} timer={}s",
        if hw.lamp { "on" } else { "off" },
        if hw.heater { "on" } else { "off" },
        hw.seconds
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Microwave Oven ===\n");

    let door_closed = StateBuilder::composite(Oven::DoorClosed, Oven::Top, Oven::Idle)
        .on(RuleBuilder::new()
            .event(|i: &Input| *i == Input::Open)
            .to(Oven::DoorOpen))?
        .handler(|hw: &mut Hardware, input: &Input| match input {
            Input::AddTime(secs) => {
                hw.seconds += secs;
                Reaction::Handled
            }
            _ => Reaction::Ignored,
        });

    let idle = StateBuilder::leaf(Oven::Idle, Oven::DoorClosed).on(RuleBuilder::new()
        .event(|i: &Input| *i == Input::Start)
        .when(|hw: &Hardware| hw.seconds > 0)
        .to(Oven::Cooking))?;

    let cooking = StateBuilder::leaf(Oven::Cooking, Oven::DoorClosed)
        .entry(|hw: &mut Hardware| hw.heater = true)
        .exit(|hw: &mut Hardware| hw.heater = false)
        .handler(|hw: &mut Hardware, input: &Input| match input {
            Input::Tick if hw.seconds <= 1 => {
                Reaction::transition_with(Oven::Idle, |hw: &mut Hardware| hw.seconds = 0)
            }
            Input::Tick => {
                hw.seconds -= 1;
                Reaction::Handled
            }
            _ => Reaction::Ignored,
        });

    let door_open = StateBuilder::leaf(Oven::DoorOpen, Oven::Top)
        .entry(|hw: &mut Hardware| hw.lamp = true)
        .exit(|hw: &mut Hardware| hw.lamp = false)
        .on(RuleBuilder::new()
            .event(|i: &Input| *i == Input::Close)
            .to(Oven::DoorClosed))?;

    let hierarchy = HierarchyBuilder::new(Oven::Top, Oven::DoorClosed)
        .state(door_closed)
        .state(idle)
        .state(cooking)
        .state(door_open)
        .build()?;

    let mut machine = Machine::new(hierarchy, Hardware::default());
    println!(
        "Started in {} ({})\n",
        machine.current_state().name(),
        describe(machine.host())
    );

    let script = [
        Input::Start,
        Input::AddTime(3),
        Input::Start,
        Input::Tick,
        Input::Open,
        Input::Tick,
        Input::Close,
        Input::Start,
        Input::Tick,
        Input::Tick,
    ];

    for input in script {
        let outcome = machine.dispatch(&input)?;
        let note = match outcome {
            DispatchOutcome::Unhandled => "ignored".to_string(),
            DispatchOutcome::Handled { by } => format!("handled by {}", by.name()),
            DispatchOutcome::Transitioned { by, from, to } => {
                format!("{} -> {} (rule on {})", from.name(), to.name(), by.name())
            }
        };
        println!(
            "{:<12} {:<40} [{}]",
            format!("{:?}", input),
            note,
            describe(machine.host())
        );
    }

    println!("\nTransitions taken: {}", machine.history().len());
    println!(
        "Leaf path: {:?}",
        machine
            .history()
            .get_path()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
    );
    println!("Events ignored: {}", machine.unhandled_events());

    Ok(())
}
