//! Smoke tests through the facade's re-exports and prelude.

use proptest::prelude::*;
use treelog::prelude::*;
use treelog::{ColorSupport, FixedColumns, FixedStamp};

fn registry() -> std::sync::Arc<Registry> {
    Registry::builder()
        .stamp(FixedStamp::new("12:00"))
        .width(FixedColumns(50))
        .color(ColorSupport::fixed(false))
        .capture()
        .build()
        .unwrap()
}

#[test]
fn prelude_covers_a_nested_session() {
    let registry = registry();
    let out = registry.renderer();
    out.announce().text("outer");
    out.announce().text("inner").ok();
    out.ok();

    let console = registry.console().unwrap().contents();
    assert!(console.starts_with("\n[12:00]     outer"));
    assert!(console.contains("\n└───[12:00]     inner"));
    assert_eq!(console.matches("[  OK  ]").count(), 2);
    assert_eq!(out.scope_depth(), 1);
}

#[test]
fn commands_replay_through_the_facade() {
    let registry = registry();
    registry.renderer().run([
        Command::Level(LogLevel::Debug),
        Command::Announce,
        Command::Text("hidden"),
        Command::Ok,
        Command::Pop,
        Command::Announce,
        Command::Text("shown"),
        Command::Fail,
    ]);

    let console = registry.console().unwrap().contents();
    assert!(!console.contains("hidden"));
    assert!(console.contains("shown"));
    assert!(console.ends_with("[ FAIL ]"));
}

#[test]
fn histograms_render_through_the_facade() {
    let registry = registry();
    let out = registry.renderer();
    out.announce().text("latency");
    out.print_hist(&[1.0, 2.0, 4.0], HistStyle::Bar).ok();

    let console = registry.console().unwrap().contents();
    assert!(console.contains("4       "));
    assert!(console.ends_with("[  OK  ]"));
}

#[test]
fn crate_aliases_reach_the_subcrates() {
    assert_eq!(treelog::text::measure("héllo".as_bytes(), treelog::Metric::Codepoints), 5);
    assert_eq!(treelog::render::HIST_HEIGHT, 20);
    assert!(treelog::core::LogLevel::Info < treelog::core::LogLevel::Debug);
}

proptest! {
    #[test]
    fn replayed_commands_follow_the_gate(
        level_idx in 0usize..5,
        word in "[a-z]{3,12}",
    ) {
        let level = LogLevel::ALL[level_idx];
        let registry = registry();
        let out = registry.renderer();
        out.run([
            Command::Level(level),
            Command::Announce,
            Command::Text(&word),
            Command::Ok,
            Command::Pop,
        ]);

        let console = registry.console().unwrap().contents();
        prop_assert_eq!(console.contains(&word), level <= LogLevel::Info);
        prop_assert_eq!(out.scope_depth(), 1);
    }
}
