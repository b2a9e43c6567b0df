//! Shared test helpers for `commu_core` integration tests.

#![allow(unreachable_pub)]

use commu_core::{Group, Property, parse_line};

/// Parse a line that the test expects to be valid.
pub fn parse_ok(line: &str) -> Group {
    parse_line(line).unwrap_or_else(|e| panic!("failed to parse {line:?}: {e}"))
}

/// Shorthand for a string property.
#[allow(dead_code)]
pub fn text(s: &str) -> Property {
    Property::String(s.to_string())
}

/// Keys of a group in order.
#[allow(dead_code)]
pub fn keys(group: &Group) -> Vec<String> {
    group.keys().map(str::to_string).collect()
}

/// Lines taken from real stage-direction scripts.
#[allow(dead_code)]
pub const SAMPLE_LINES: &[&str] = &[
    "[message text=おはようございます、プロデューサー name=咲季 clip=\\{\"_startTime\":0.5,\"_duration\":3.2\\}]",
    "[narration text=……朝の事務所。\\n誰もいない。]",
    "[backgroundgroup backgrounds=[background id=bg_office src=env_2d_adv_office-00-day] backgrounds=[background id=bg_hall src=env_2d_adv_hall-00-night]]",
    "[actorlayout id=saki transform=[transform position=\\{\"x\":0.0,\"y\":0.0\\}] clip=\\{\"_startTime\":0.0\\}]",
    "[actormotion id=saki motion=sk_idle_01 curve=AnimationCurve::\\{\"keys\":[0,1]\\} clip=\\{\"_startTime\":1.0\\}]",
    "[choicegroup choices=[choice text=はい] choices=[choice text=いいえ]]",
    "[title text=1+1\\=2]",
];
