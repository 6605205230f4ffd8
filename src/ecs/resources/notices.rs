use bevy_ecs::resource::Resource;

use crate::model::{Cell, Tone};

/// A one-line message surfaced to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
    pub tick: i64,
}

/// A titled notification, optionally pointing the player at a map cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    pub title: String,
    pub text: String,
    pub tone: Tone,
    pub target: Option<Cell>,
    pub tick: i64,
}

/// Accumulates notices and letters until the host drains them.
///
/// This is the engine's only outward channel: matches, celebration starts and
/// failures all land here as data, never as UI calls.
#[derive(Resource, Debug, Clone, Default)]
pub struct NoticeBoard {
    pub notices: Vec<Notice>,
    pub letters: Vec<Letter>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_notice(&mut self, text: impl Into<String>, tone: Tone, tick: i64) {
        self.notices.push(Notice {
            text: text.into(),
            tone,
            tick,
        });
    }

    pub fn post_letter(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        tone: Tone,
        target: Option<Cell>,
        tick: i64,
    ) {
        self.letters.push(Letter {
            title: title.into(),
            text: text.into(),
            tone,
            target,
            tick,
        });
    }

    pub fn clear(&mut self) {
        self.notices.clear();
        self.letters.clear();
    }
}
